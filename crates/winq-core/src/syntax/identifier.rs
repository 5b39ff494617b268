//! Leaf nodes: schemas, columns, bind parameters and literal values.

use core::fmt;
use core::ops::ControlFlow;

use super::{walk_opt, Identifier, Node, Visitor};

/// A schema (database) name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schema {
    /// Schema name.
    pub name: String,
}

impl Schema {
    /// Creates a schema reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The main database.
    #[must_use]
    pub fn main() -> Self {
        Self::new("main")
    }

    /// The temporary database.
    #[must_use]
    pub fn temp() -> Self {
        Self::new("temp")
    }
}

impl From<&str> for Schema {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Schema {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Identifier for Schema {
    fn node(&self) -> Node<'_> {
        Node::Schema(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty()
    }
}

/// A column reference, optionally qualified by table and schema.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    /// Column name, `*` for all columns.
    pub name: String,
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Optional schema qualifier, rendered only together with a table.
    pub schema: Option<Schema>,
}

impl Column {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            table: None,
            schema: None,
        }
    }

    /// All columns (`*`).
    #[must_use]
    pub fn all() -> Self {
        Self::new("*")
    }

    /// The `rowid` pseudo-column.
    #[must_use]
    pub fn rowid() -> Self {
        Self::new("rowid")
    }

    /// Qualifies the column with a table.
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Qualifies the column's table with a schema.
    #[must_use]
    pub fn schema(mut self, schema: impl Into<Schema>) -> Self {
        self.schema = Some(schema.into());
        self
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(table) = &self.table {
            if let Some(schema) = &self.schema {
                write!(f, "{schema}.")?;
            }
            write!(f, "{table}.")?;
        }
        f.write_str(&self.name)
    }
}

impl Identifier for Column {
    fn node(&self) -> Node<'_> {
        Node::Column(self)
    }

    fn is_valid(&self) -> bool {
        !self.name.is_empty() && !matches!(&self.table, Some(table) if table.is_empty())
    }

    fn walk_children(&self, visitor: &mut dyn Visitor) -> ControlFlow<()> {
        if self.table.is_some() {
            walk_opt(self.schema.as_ref(), visitor)?;
        }
        ControlFlow::Continue(())
    }
}

/// A bind parameter placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BindParameter {
    /// `?` when the index is 0, `?N` otherwise.
    QuestionSign(u32),
    /// `:name`
    Colon(String),
    /// `$name`
    Dollar(String),
    /// `@name`
    At(String),
}

impl BindParameter {
    /// A numbered parameter, `?N`.
    #[must_use]
    pub const fn new(index: u32) -> Self {
        Self::QuestionSign(index)
    }

    /// An anonymous parameter, `?`.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self::QuestionSign(0)
    }

    /// A named parameter, `:name`.
    #[must_use]
    pub fn colon(name: impl Into<String>) -> Self {
        Self::Colon(name.into())
    }

    /// A named parameter, `$name`.
    #[must_use]
    pub fn dollar(name: impl Into<String>) -> Self {
        Self::Dollar(name.into())
    }

    /// A named parameter, `@name`.
    #[must_use]
    pub fn at(name: impl Into<String>) -> Self {
        Self::At(name.into())
    }

    /// Numbered parameters `?1` through `?count`.
    #[must_use]
    pub fn sequence(count: u32) -> Vec<Self> {
        (1..=count).map(Self::new).collect()
    }
}

impl fmt::Display for BindParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QuestionSign(0) => f.write_str("?"),
            Self::QuestionSign(index) => write!(f, "?{index}"),
            Self::Colon(name) => write!(f, ":{name}"),
            Self::Dollar(name) => write!(f, "${name}"),
            Self::At(name) => write!(f, "@{name}"),
        }
    }
}

impl Identifier for BindParameter {
    fn node(&self) -> Node<'_> {
        Node::BindParameter(self)
    }

    fn is_valid(&self) -> bool {
        match self {
            Self::QuestionSign(_) => true,
            Self::Colon(name) | Self::Dollar(name) | Self::At(name) => !name.is_empty(),
        }
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
}

impl LiteralValue {
    /// Returns `true` if the rendered literal starts with a minus sign.
    pub(crate) fn is_negative(&self) -> bool {
        match self {
            Self::Integer(value) => *value < 0,
            Self::Float(value) => value.is_sign_negative() && !value.is_nan(),
            _ => false,
        }
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for LiteralValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for LiteralValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f32> for LiteralValue {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<u8>> for LiteralValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Blob(value)
    }
}

impl From<&[u8]> for LiteralValue {
    fn from(value: &[u8]) -> Self {
        Self::Blob(value.to_vec())
    }
}

impl<T: Into<Self>> From<Option<T>> for LiteralValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(true) => f.write_str("TRUE"),
            Self::Bool(false) => f.write_str("FALSE"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_real(*value)),
            Self::String(value) => write_quoted(f, value),
            Self::Blob(value) => write!(f, "X'{}'", hex::encode_upper(value)),
            Self::CurrentTime => f.write_str("CURRENT_TIME"),
            Self::CurrentDate => f.write_str("CURRENT_DATE"),
            Self::CurrentTimestamp => f.write_str("CURRENT_TIMESTAMP"),
        }
    }
}

impl Identifier for LiteralValue {
    fn node(&self) -> Node<'_> {
        Node::LiteralValue(self)
    }
}

/// Writes a single-quoted SQL string, doubling embedded quotes.
pub(crate) fn write_quoted(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    write!(f, "'{}'", value.replace('\'', "''"))
}

/// Formats a float with 17 significant digits, the way C's `%.17g` does.
///
/// NaN has no SQL literal and renders as `NULL`; infinities render as
/// out-of-range literals that SQLite reads back as infinities.
fn format_real(value: f64) -> String {
    if value.is_nan() {
        return String::from("NULL");
    }
    if value.is_infinite() {
        return String::from(if value > 0.0 { "1e999" } else { "-1e999" });
    }
    let scientific = format!("{value:.16e}");
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };
    if (-4..17).contains(&exponent) {
        let precision = usize::try_from(16 - exponent).unwrap_or_default();
        trim_fraction(format!("{value:.precision$}"))
    } else {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{sign}{:02}",
            trim_fraction(mantissa.to_owned()),
            exponent.unsigned_abs()
        )
    }
}

fn trim_fraction(mut digits: String) -> String {
    if digits.contains('.') {
        let trimmed = digits.trim_end_matches('0').trim_end_matches('.').len();
        digits.truncate(trimmed);
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_formatting() {
        assert_eq!(format_real(1.1), "1.1000000000000001");
        assert_eq!(format_real(1.2), "1.2");
        assert_eq!(format_real(0.0), "0");
        assert_eq!(format_real(-2.5), "-2.5");
        assert_eq!(format_real(100.0), "100");
        assert_eq!(format_real(0.0001), "0.0001");
        assert_eq!(format_real(1e20), "1e+20");
        assert_eq!(format_real(1e-5), "1.0000000000000001e-05");
        assert_eq!(format_real(f64::NAN), "NULL");
        assert_eq!(format_real(f64::INFINITY), "1e999");
        assert_eq!(format_real(f64::NEG_INFINITY), "-1e999");
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(LiteralValue::Null.to_string(), "NULL");
        assert_eq!(LiteralValue::from(true).to_string(), "TRUE");
        assert_eq!(LiteralValue::from(false).to_string(), "FALSE");
        assert_eq!(LiteralValue::from(-7).to_string(), "-7");
        assert_eq!(LiteralValue::from("it's").to_string(), "'it''s'");
        assert_eq!(
            LiteralValue::from(vec![0x01_u8, 0xab]).to_string(),
            "X'01AB'"
        );
        assert_eq!(
            LiteralValue::CurrentTimestamp.to_string(),
            "CURRENT_TIMESTAMP"
        );
        assert_eq!(LiteralValue::from(None::<i64>).to_string(), "NULL");
    }

    #[test]
    fn test_bind_parameter_rendering() {
        assert_eq!(BindParameter::anonymous().to_string(), "?");
        assert_eq!(BindParameter::new(1).to_string(), "?1");
        assert_eq!(BindParameter::colon("id").to_string(), ":id");
        assert_eq!(BindParameter::dollar("id").to_string(), "$id");
        assert_eq!(BindParameter::at("id").to_string(), "@id");
        assert!(!BindParameter::colon("").is_valid());
    }

    #[test]
    fn test_bind_parameter_sequence() {
        let parameters: Vec<String> = BindParameter::sequence(3)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(parameters, ["?1", "?2", "?3"]);
    }

    #[test]
    fn test_column_rendering() {
        assert_eq!(Column::new("id").to_string(), "id");
        assert_eq!(Column::new("id").table("users").to_string(), "users.id");
        assert_eq!(
            Column::new("id")
                .table("users")
                .schema(Schema::main())
                .to_string(),
            "main.users.id"
        );
        assert_eq!(Column::new("id").schema("main").to_string(), "id");
        assert_eq!(Column::all().table("users").to_string(), "users.*");
        assert_eq!(Column::rowid().to_string(), "rowid");
    }

    #[test]
    fn test_column_validity() {
        assert!(Column::new("id").is_valid());
        assert!(!Column::new("").is_valid());
        assert!(!Column::new("id").table("").is_valid());
    }
}
