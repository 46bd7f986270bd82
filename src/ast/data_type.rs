use std::fmt;

use serde::{Deserialize, Serialize};

use super::display::{display_comma_separated, escape_quoted};
use super::{Expr, Ident, ObjectName};

/// SQL data types, spelled the way they were written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    // character strings
    Character(Option<CharacterLength>),
    Char(Option<CharacterLength>),
    CharacterVarying(Option<CharacterLength>),
    CharVarying(Option<CharacterLength>),
    Varchar(Option<CharacterLength>),
    Nvarchar(Option<CharacterLength>),
    Nchar(Option<CharacterLength>),
    CharacterLargeObject(Option<u64>),
    CharLargeObject(Option<u64>),
    Clob(Option<u64>),
    Text,
    TinyText,
    MediumText,
    LongText,
    String(Option<u64>),
    FixedString(u64),
    Uuid,

    // binary strings
    Binary(Option<u64>),
    Varbinary(Option<BinaryLength>),
    Blob(Option<u64>),
    TinyBlob,
    MediumBlob,
    LongBlob,
    Bytes(Option<u64>),
    Bytea,
    Bit(Option<u64>),
    BitVarying(Option<u64>),

    // exact numerics
    Numeric(ExactNumberInfo),
    Decimal(ExactNumberInfo),
    Dec(ExactNumberInfo),
    BigNumeric(ExactNumberInfo),
    BigDecimal(ExactNumberInfo),
    TinyInt(Option<u64>),
    TinyIntUnsigned(Option<u64>),
    SmallInt(Option<u64>),
    SmallIntUnsigned(Option<u64>),
    MediumInt(Option<u64>),
    MediumIntUnsigned(Option<u64>),
    Int(Option<u64>),
    IntUnsigned(Option<u64>),
    Integer(Option<u64>),
    IntegerUnsigned(Option<u64>),
    BigInt(Option<u64>),
    BigIntUnsigned(Option<u64>),
    Int2(Option<u64>),
    Int4(Option<u64>),
    Int8(Option<u64>),
    Int16,
    Int32,
    Int64,
    Int128,
    Int256,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    UInt128,
    UInt256,
    Unsigned,

    // approximate numerics
    Float(Option<u64>),
    Float4,
    Float8,
    Float32,
    Float64,
    Real,
    Double(ExactNumberInfo),
    DoublePrecision,

    // booleans
    Bool,
    Boolean,

    // temporal
    Date,
    Date32,
    Time(Option<u64>, TimezoneInfo),
    Datetime(Option<u64>),
    Datetime64(u64, Option<String>),
    Timestamp(Option<u64>, TimezoneInfo),
    TimestampNtz,
    Interval,

    // semi-structured
    Json,
    Jsonb,
    Variant,
    Object,
    Regclass,

    // containers
    Array(ArrayElemTypeDef),
    Map(Box<DataType>, Box<DataType>),
    Tuple(Vec<StructField>),
    Struct(Vec<StructField>, StructBracketKind),
    Union(Vec<UnionField>),
    Enum(Vec<EnumMember>, Option<u8>),
    Set(Vec<String>),
    Nullable(Box<DataType>),
    LowCardinality(Box<DataType>),

    /// A type name the grammar does not know, with any parenthesized
    /// modifiers, e.g. `geometry(Point, 4326)`.
    Custom(ObjectName, Vec<String>),
    /// No type given, e.g. SQLite column definitions.
    Unspecified,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DataType::Character(len) => format_character_string_type(f, "CHARACTER", len),
            DataType::Char(len) => format_character_string_type(f, "CHAR", len),
            DataType::CharacterVarying(len) => {
                format_character_string_type(f, "CHARACTER VARYING", len)
            }
            DataType::CharVarying(len) => format_character_string_type(f, "CHAR VARYING", len),
            DataType::Varchar(len) => format_character_string_type(f, "VARCHAR", len),
            DataType::Nvarchar(len) => format_character_string_type(f, "NVARCHAR", len),
            DataType::Nchar(len) => format_character_string_type(f, "NCHAR", len),
            DataType::CharacterLargeObject(size) => {
                format_type_with_optional_length(f, "CHARACTER LARGE OBJECT", size, false)
            }
            DataType::CharLargeObject(size) => {
                format_type_with_optional_length(f, "CHAR LARGE OBJECT", size, false)
            }
            DataType::Clob(size) => format_type_with_optional_length(f, "CLOB", size, false),
            DataType::Text => f.write_str("TEXT"),
            DataType::TinyText => f.write_str("TINYTEXT"),
            DataType::MediumText => f.write_str("MEDIUMTEXT"),
            DataType::LongText => f.write_str("LONGTEXT"),
            DataType::String(size) => format_type_with_optional_length(f, "STRING", size, false),
            DataType::FixedString(size) => write!(f, "FixedString({})", size),
            DataType::Uuid => f.write_str("UUID"),
            DataType::Binary(size) => format_type_with_optional_length(f, "BINARY", size, false),
            DataType::Varbinary(size) => match size {
                Some(size) => write!(f, "VARBINARY({})", size),
                None => f.write_str("VARBINARY"),
            },
            DataType::Blob(size) => format_type_with_optional_length(f, "BLOB", size, false),
            DataType::TinyBlob => f.write_str("TINYBLOB"),
            DataType::MediumBlob => f.write_str("MEDIUMBLOB"),
            DataType::LongBlob => f.write_str("LONGBLOB"),
            DataType::Bytes(size) => format_type_with_optional_length(f, "BYTES", size, false),
            DataType::Bytea => f.write_str("BYTEA"),
            DataType::Bit(size) => format_type_with_optional_length(f, "BIT", size, false),
            DataType::BitVarying(size) => {
                format_type_with_optional_length(f, "BIT VARYING", size, false)
            }
            DataType::Numeric(info) => write!(f, "NUMERIC{}", info),
            DataType::Decimal(info) => write!(f, "DECIMAL{}", info),
            DataType::Dec(info) => write!(f, "DEC{}", info),
            DataType::BigNumeric(info) => write!(f, "BIGNUMERIC{}", info),
            DataType::BigDecimal(info) => write!(f, "BIGDECIMAL{}", info),
            DataType::TinyInt(w) => format_type_with_optional_length(f, "TINYINT", w, false),
            DataType::TinyIntUnsigned(w) => {
                format_type_with_optional_length(f, "TINYINT", w, true)
            }
            DataType::SmallInt(w) => format_type_with_optional_length(f, "SMALLINT", w, false),
            DataType::SmallIntUnsigned(w) => {
                format_type_with_optional_length(f, "SMALLINT", w, true)
            }
            DataType::MediumInt(w) => format_type_with_optional_length(f, "MEDIUMINT", w, false),
            DataType::MediumIntUnsigned(w) => {
                format_type_with_optional_length(f, "MEDIUMINT", w, true)
            }
            DataType::Int(w) => format_type_with_optional_length(f, "INT", w, false),
            DataType::IntUnsigned(w) => format_type_with_optional_length(f, "INT", w, true),
            DataType::Integer(w) => format_type_with_optional_length(f, "INTEGER", w, false),
            DataType::IntegerUnsigned(w) => {
                format_type_with_optional_length(f, "INTEGER", w, true)
            }
            DataType::BigInt(w) => format_type_with_optional_length(f, "BIGINT", w, false),
            DataType::BigIntUnsigned(w) => {
                format_type_with_optional_length(f, "BIGINT", w, true)
            }
            DataType::Int2(w) => format_type_with_optional_length(f, "INT2", w, false),
            DataType::Int4(w) => format_type_with_optional_length(f, "INT4", w, false),
            DataType::Int8(w) => format_type_with_optional_length(f, "INT8", w, false),
            DataType::Int16 => f.write_str("Int16"),
            DataType::Int32 => f.write_str("Int32"),
            DataType::Int64 => f.write_str("INT64"),
            DataType::Int128 => f.write_str("Int128"),
            DataType::Int256 => f.write_str("Int256"),
            DataType::UInt8 => f.write_str("UInt8"),
            DataType::UInt16 => f.write_str("UInt16"),
            DataType::UInt32 => f.write_str("UInt32"),
            DataType::UInt64 => f.write_str("UInt64"),
            DataType::UInt128 => f.write_str("UInt128"),
            DataType::UInt256 => f.write_str("UInt256"),
            DataType::Unsigned => f.write_str("UNSIGNED"),
            DataType::Float(p) => format_type_with_optional_length(f, "FLOAT", p, false),
            DataType::Float4 => f.write_str("FLOAT4"),
            DataType::Float8 => f.write_str("FLOAT8"),
            DataType::Float32 => f.write_str("Float32"),
            DataType::Float64 => f.write_str("FLOAT64"),
            DataType::Real => f.write_str("REAL"),
            DataType::Double(info) => write!(f, "DOUBLE{}", info),
            DataType::DoublePrecision => f.write_str("DOUBLE PRECISION"),
            DataType::Bool => f.write_str("BOOL"),
            DataType::Boolean => f.write_str("BOOLEAN"),
            DataType::Date => f.write_str("DATE"),
            DataType::Date32 => f.write_str("Date32"),
            DataType::Time(precision, tz) => format_temporal(f, "TIME", precision, tz),
            DataType::Datetime(precision) => {
                format_type_with_optional_length(f, "DATETIME", precision, false)
            }
            DataType::Datetime64(precision, tz) => match tz {
                Some(tz) => write!(f, "DateTime64({}, '{}')", precision, escape_quoted(tz, '\'')),
                None => write!(f, "DateTime64({})", precision),
            },
            DataType::Timestamp(precision, tz) => format_temporal(f, "TIMESTAMP", precision, tz),
            DataType::TimestampNtz => f.write_str("TIMESTAMP_NTZ"),
            DataType::Interval => f.write_str("INTERVAL"),
            DataType::Json => f.write_str("JSON"),
            DataType::Jsonb => f.write_str("JSONB"),
            DataType::Variant => f.write_str("VARIANT"),
            DataType::Object => f.write_str("OBJECT"),
            DataType::Regclass => f.write_str("REGCLASS"),
            DataType::Array(elem) => write!(f, "{}", elem),
            DataType::Map(key, value) => write!(f, "Map({}, {})", key, value),
            DataType::Tuple(fields) => write!(f, "Tuple({})", display_comma_separated(fields)),
            DataType::Struct(fields, StructBracketKind::AngleBrackets) => {
                write!(f, "STRUCT<{}>", display_comma_separated(fields))
            }
            DataType::Struct(fields, StructBracketKind::Parentheses) => {
                write!(f, "STRUCT({})", display_comma_separated(fields))
            }
            DataType::Union(fields) => write!(f, "UNION({})", display_comma_separated(fields)),
            DataType::Enum(members, bits) => {
                match bits {
                    Some(bits) => write!(f, "ENUM{}", bits)?,
                    None => f.write_str("ENUM")?,
                }
                write!(f, "({})", display_comma_separated(members))
            }
            DataType::Set(members) => {
                f.write_str("SET(")?;
                let mut delim = "";
                for member in members {
                    write!(f, "{}'{}'", delim, escape_quoted(member, '\''))?;
                    delim = ", ";
                }
                f.write_str(")")
            }
            DataType::Nullable(inner) => write!(f, "Nullable({})", inner),
            DataType::LowCardinality(inner) => write!(f, "LowCardinality({})", inner),
            DataType::Custom(name, modifiers) => {
                if modifiers.is_empty() {
                    write!(f, "{}", name)
                } else {
                    write!(f, "{}({})", name, modifiers.join(", "))
                }
            }
            DataType::Unspecified => Ok(()),
        }
    }
}

fn format_type_with_optional_length(
    f: &mut fmt::Formatter,
    sql_type: &'static str,
    len: &Option<u64>,
    unsigned: bool,
) -> fmt::Result {
    write!(f, "{}", sql_type)?;
    if let Some(len) = len {
        write!(f, "({})", len)?;
    }
    if unsigned {
        write!(f, " UNSIGNED")?;
    }
    Ok(())
}

/// `TZ` is part of the type name, so it goes before the precision.
fn format_temporal(
    f: &mut fmt::Formatter,
    sql_type: &'static str,
    precision: &Option<u64>,
    tz: &TimezoneInfo,
) -> fmt::Result {
    match tz {
        TimezoneInfo::Tz => {
            write!(f, "{}TZ", sql_type)?;
            if let Some(precision) = precision {
                write!(f, "({})", precision)?;
            }
            Ok(())
        }
        _ => {
            format_type_with_optional_length(f, sql_type, precision, false)?;
            write!(f, "{}", tz)
        }
    }
}

fn format_character_string_type(
    f: &mut fmt::Formatter,
    sql_type: &str,
    size: &Option<CharacterLength>,
) -> fmt::Result {
    write!(f, "{}", sql_type)?;
    if let Some(size) = size {
        write!(f, "({})", size)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterLength {
    IntegerLength {
        length: u64,
        unit: Option<CharLengthUnits>,
    },
    /// `VARCHAR(MAX)`
    Max,
}

impl fmt::Display for CharacterLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CharacterLength::IntegerLength { length, unit } => {
                write!(f, "{}", length)?;
                if let Some(unit) = unit {
                    write!(f, " {}", unit)?;
                }
                Ok(())
            }
            CharacterLength::Max => f.write_str("MAX"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharLengthUnits {
    Characters,
    Octets,
}

impl fmt::Display for CharLengthUnits {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CharLengthUnits::Characters => f.write_str("CHARACTERS"),
            CharLengthUnits::Octets => f.write_str("OCTETS"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryLength {
    IntegerLength { length: u64 },
    Max,
}

impl fmt::Display for BinaryLength {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryLength::IntegerLength { length } => write!(f, "{}", length),
            BinaryLength::Max => f.write_str("MAX"),
        }
    }
}

/// Precision and scale of exact numeric types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExactNumberInfo {
    None,
    Precision(u64),
    PrecisionAndScale(u64, i64),
}

impl fmt::Display for ExactNumberInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ExactNumberInfo::None => Ok(()),
            ExactNumberInfo::Precision(p) => write!(f, "({})", p),
            ExactNumberInfo::PrecisionAndScale(p, s) => write!(f, "({}, {})", p, s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimezoneInfo {
    None,
    /// `TIMESTAMPTZ`, written after the base type as `TZ`
    Tz,
    WithTimeZone,
    WithoutTimeZone,
}

impl fmt::Display for TimezoneInfo {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TimezoneInfo::None => Ok(()),
            TimezoneInfo::Tz => f.write_str("TZ"),
            TimezoneInfo::WithTimeZone => f.write_str(" WITH TIME ZONE"),
            TimezoneInfo::WithoutTimeZone => f.write_str(" WITHOUT TIME ZONE"),
        }
    }
}

/// How the element type of an array was written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArrayElemTypeDef {
    /// Bare `ARRAY`
    None,
    /// `ARRAY<INT>`
    AngleBracket(Box<DataType>),
    /// `INT[]` or `INT[3]`
    SquareBracket(Box<DataType>, Option<u64>),
    /// `Array(Int64)`
    Parenthesis(Box<DataType>),
}

impl fmt::Display for ArrayElemTypeDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayElemTypeDef::None => f.write_str("ARRAY"),
            ArrayElemTypeDef::AngleBracket(inner) => write!(f, "ARRAY<{}>", inner),
            ArrayElemTypeDef::SquareBracket(inner, None) => write!(f, "{}[]", inner),
            ArrayElemTypeDef::SquareBracket(inner, Some(size)) => write!(f, "{}[{}]", inner, size),
            ArrayElemTypeDef::Parenthesis(inner) => write!(f, "Array({})", inner),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructBracketKind {
    Parentheses,
    AngleBrackets,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructField {
    pub field_name: Option<Ident>,
    pub field_type: DataType,
}

impl fmt::Display for StructField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.field_name {
            Some(name) => write!(f, "{} {}", name, self.field_type),
            None => write!(f, "{}", self.field_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnionField {
    pub field_name: Ident,
    pub field_type: DataType,
}

impl fmt::Display for UnionField {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.field_name, self.field_type)
    }
}

/// A member of an `ENUM` type, optionally with an explicit value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnumMember {
    Name(String),
    NamedValue(String, Expr),
}

impl fmt::Display for EnumMember {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EnumMember::Name(name) => write!(f, "'{}'", escape_quoted(name, '\'')),
            EnumMember::NamedValue(name, value) => {
                write!(f, "'{}' = {}", escape_quoted(name, '\''), value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_display() {
        assert_eq!(
            "DECIMAL(10, 2)",
            DataType::Decimal(ExactNumberInfo::PrecisionAndScale(10, 2)).to_string()
        );
        assert_eq!("NUMERIC", DataType::Numeric(ExactNumberInfo::None).to_string());
        assert_eq!("INT(11) UNSIGNED", DataType::IntUnsigned(Some(11)).to_string());
    }

    #[test]
    fn nested_display() {
        let map = DataType::Map(
            Box::new(DataType::String(None)),
            Box::new(DataType::Array(ArrayElemTypeDef::Parenthesis(Box::new(
                DataType::Int64,
            )))),
        );
        assert_eq!("Map(STRING, Array(INT64))", map.to_string());
        let arr = DataType::Array(ArrayElemTypeDef::SquareBracket(
            Box::new(DataType::Integer(None)),
            None,
        ));
        assert_eq!("INTEGER[]", arr.to_string());
        let nullable = DataType::Nullable(Box::new(DataType::Varchar(Some(
            CharacterLength::IntegerLength {
                length: 20,
                unit: None,
            },
        ))));
        assert_eq!("Nullable(VARCHAR(20))", nullable.to_string());
    }

    #[test]
    fn temporal_display() {
        assert_eq!(
            "TIMESTAMP(3) WITH TIME ZONE",
            DataType::Timestamp(Some(3), TimezoneInfo::WithTimeZone).to_string()
        );
        assert_eq!("TIMETZ", DataType::Time(None, TimezoneInfo::Tz).to_string());
        assert_eq!(
            "TIMESTAMPTZ(6)",
            DataType::Timestamp(Some(6), TimezoneInfo::Tz).to_string()
        );
    }
}
