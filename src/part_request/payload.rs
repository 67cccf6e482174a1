//! Part-request form cleaning and validation.

use serde_json::{Number, Value};

const NAME_MAX: usize = 120;
const EMAIL_MAX: usize = 180;
const ORGANIZATION_MAX: usize = 160;
const FAMILY_MAX: usize = 120;
const PART_NUMBER_MAX: usize = 180;
const DETAILS_MAX: usize = 3000;

/// A cleaned part-request submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartRequest {
    pub name: String,
    pub email: String,
    pub organization: String,
    pub family: String,
    pub part_number: String,
    pub details: String,
}

impl PartRequest {
    /// Clean the raw request body. Anything that is not a JSON object is
    /// treated as an empty form.
    pub fn from_body(body: &[u8]) -> Self {
        match serde_json::from_slice::<Value>(body) {
            Ok(value) => Self::from_json(&value),
            Err(_) => Self::default(),
        }
    }

    pub fn from_json(value: &Value) -> Self {
        let field = |key: &str| value.as_object().map(|o| text(o.get(key))).unwrap_or_default();

        let mut part_number = field("partNumber");
        if part_number.is_empty() {
            part_number = field("requestedPart");
        }

        Self {
            name: clean_line(&field("name"), NAME_MAX),
            email: clean_line(&field("email"), EMAIL_MAX),
            organization: clean_line(&field("organization"), ORGANIZATION_MAX),
            family: clean_line(&field("family"), FAMILY_MAX),
            part_number: clean_line(&part_number, PART_NUMBER_MAX),
            details: clean_block(&field("details"), DETAILS_MAX),
        }
    }

    /// First failing rule, as a message for the submitter.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.is_empty() {
            return Err("Name is required.");
        }
        if self.email.is_empty() || !is_email(&self.email) {
            return Err("A valid email is required.");
        }
        if self.family.is_empty() {
            return Err("Component family is required.");
        }
        if self.part_number.is_empty() {
            return Err("Requested part number/pattern is required.");
        }
        if self.details.is_empty() {
            return Err("Details are required.");
        }
        Ok(())
    }

    pub fn subject(&self) -> String {
        format!("Part Request: {}", self.part_number)
    }

    /// Plain-text notification body.
    pub fn email_text(&self) -> String {
        let organization = if self.organization.is_empty() {
            "(not provided)"
        } else {
            &self.organization
        };

        [
            "New part request submission".to_string(),
            String::new(),
            format!("Name: {}", self.name),
            format!("Email: {}", self.email),
            format!("Organization: {}", organization),
            format!("Family: {}", self.family),
            format!("Requested Part/Pattern: {}", self.part_number),
            String::new(),
            "Details:".to_string(),
            self.details.clone(),
        ]
        .join("\n")
    }
}

/// Truthy scalars become text; falsy values, arrays and objects are empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => number_text(n),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

/// Whole-valued floats print without a fractional part (`1e3` is `1000`).
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{:.0}", f),
        _ => n.to_string(),
    }
}

/// Collapse whitespace runs to a single space, trim, truncate.
fn clean_line(value: &str, max: usize) -> String {
    let collapsed = value.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(max).collect()
}

/// Normalize line endings, trim, truncate. Inner whitespace is kept.
fn clean_block(value: &str, max: usize) -> String {
    value.replace("\r\n", "\n").trim().chars().take(max).collect()
}

/// `local@domain.tld`: no whitespace, one `@`, and a dot inside the domain.
pub fn is_email(value: &str) -> bool {
    let value = value.trim();
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}
