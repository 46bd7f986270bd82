use super::token::Token;
use super::{render_tokens, PResult, Parser};
use crate::ast::{
    ArrayElemTypeDef, BinaryLength, CharLengthUnits, CharacterLength, DataType, EnumMember,
    ExactNumberInfo, StructBracketKind, StructField, TimezoneInfo, UnionField,
};

impl Parser {
    /// Parses a data type, including any trailing `[]` or `[n]` array
    /// suffixes.
    pub(super) fn parse_data_type(&mut self) -> PResult<DataType> {
        self.descend(|p| {
            let mut data_type = p.parse_base_data_type()?;
            while p.peek_token() == &Token::LBracket {
                let size = match (&p.peek_nth(1).token, &p.peek_nth(2).token) {
                    (Token::RBracket, _) => {
                        p.index += 2;
                        None
                    }
                    (Token::Number(_), Token::RBracket) => {
                        p.index += 1;
                        let size = p.parse_literal_uint()?;
                        p.index += 1;
                        Some(size)
                    }
                    _ => break,
                };
                data_type = DataType::Array(ArrayElemTypeDef::SquareBracket(
                    Box::new(data_type),
                    size,
                ));
            }
            Ok(data_type)
        })
    }

    fn parse_base_data_type(&mut self) -> PResult<DataType> {
        let word = match self.peek_token() {
            Token::Word(word) => word.clone(),
            _ => return self.expected("a data type"),
        };
        if word.quote_style.is_some() {
            return self.parse_custom_type();
        }
        let keyword = word.value.to_ascii_uppercase();
        self.index += 1;

        let data_type = match keyword.as_str() {
            "CHARACTER" | "CHAR" => {
                let plain = keyword == "CHAR";
                if self.next_if_keyword("VARYING") {
                    let len = self.parse_optional_character_length()?;
                    if plain {
                        DataType::CharVarying(len)
                    } else {
                        DataType::CharacterVarying(len)
                    }
                } else if self.next_if_keywords(&["LARGE", "OBJECT"]) {
                    let len = self.parse_optional_precision()?;
                    if plain {
                        DataType::CharLargeObject(len)
                    } else {
                        DataType::CharacterLargeObject(len)
                    }
                } else {
                    let len = self.parse_optional_character_length()?;
                    if plain {
                        DataType::Char(len)
                    } else {
                        DataType::Character(len)
                    }
                }
            }
            "VARCHAR" => DataType::Varchar(self.parse_optional_character_length()?),
            "NVARCHAR" => DataType::Nvarchar(self.parse_optional_character_length()?),
            "NCHAR" => DataType::Nchar(self.parse_optional_character_length()?),
            "CLOB" => DataType::Clob(self.parse_optional_precision()?),
            "TEXT" => DataType::Text,
            "TINYTEXT" => DataType::TinyText,
            "MEDIUMTEXT" => DataType::MediumText,
            "LONGTEXT" => DataType::LongText,
            "STRING" => DataType::String(self.parse_optional_precision()?),
            "FIXEDSTRING" => {
                self.expect_token(&Token::LParen)?;
                let len = self.parse_literal_uint()?;
                self.expect_token(&Token::RParen)?;
                DataType::FixedString(len)
            }
            "UUID" => DataType::Uuid,

            "BINARY" => DataType::Binary(self.parse_optional_precision()?),
            "VARBINARY" => DataType::Varbinary(self.parse_optional_binary_length()?),
            "BLOB" => DataType::Blob(self.parse_optional_precision()?),
            "TINYBLOB" => DataType::TinyBlob,
            "MEDIUMBLOB" => DataType::MediumBlob,
            "LONGBLOB" => DataType::LongBlob,
            "BYTES" => DataType::Bytes(self.parse_optional_precision()?),
            "BYTEA" => DataType::Bytea,
            "BIT" => {
                if self.next_if_keyword("VARYING") {
                    DataType::BitVarying(self.parse_optional_precision()?)
                } else {
                    DataType::Bit(self.parse_optional_precision()?)
                }
            }

            "NUMERIC" => DataType::Numeric(self.parse_exact_number_info()?),
            "DECIMAL" => DataType::Decimal(self.parse_exact_number_info()?),
            "DEC" => DataType::Dec(self.parse_exact_number_info()?),
            "BIGNUMERIC" => DataType::BigNumeric(self.parse_exact_number_info()?),
            "BIGDECIMAL" => DataType::BigDecimal(self.parse_exact_number_info()?),
            "TINYINT" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::TinyIntUnsigned(width)
                } else {
                    DataType::TinyInt(width)
                }
            }
            "SMALLINT" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::SmallIntUnsigned(width)
                } else {
                    DataType::SmallInt(width)
                }
            }
            "MEDIUMINT" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::MediumIntUnsigned(width)
                } else {
                    DataType::MediumInt(width)
                }
            }
            "INT" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::IntUnsigned(width)
                } else {
                    DataType::Int(width)
                }
            }
            "INTEGER" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::IntegerUnsigned(width)
                } else {
                    DataType::Integer(width)
                }
            }
            "BIGINT" => {
                let width = self.parse_optional_precision()?;
                if self.next_if_keyword("UNSIGNED") {
                    DataType::BigIntUnsigned(width)
                } else {
                    DataType::BigInt(width)
                }
            }
            "INT2" => DataType::Int2(self.parse_optional_precision()?),
            "INT4" => DataType::Int4(self.parse_optional_precision()?),
            "INT8" => DataType::Int8(self.parse_optional_precision()?),
            "INT16" => DataType::Int16,
            "INT32" => DataType::Int32,
            "INT64" => DataType::Int64,
            "INT128" => DataType::Int128,
            "INT256" => DataType::Int256,
            "UINT8" => DataType::UInt8,
            "UINT16" => DataType::UInt16,
            "UINT32" => DataType::UInt32,
            "UINT64" => DataType::UInt64,
            "UINT128" => DataType::UInt128,
            "UINT256" => DataType::UInt256,
            "UNSIGNED" => DataType::Unsigned,

            "FLOAT" => DataType::Float(self.parse_optional_precision()?),
            "FLOAT4" => DataType::Float4,
            "FLOAT8" => DataType::Float8,
            "FLOAT32" => DataType::Float32,
            "FLOAT64" => DataType::Float64,
            "REAL" => DataType::Real,
            "DOUBLE" => {
                if self.next_if_keyword("PRECISION") {
                    DataType::DoublePrecision
                } else {
                    DataType::Double(self.parse_exact_number_info()?)
                }
            }
            "BOOL" => DataType::Bool,
            "BOOLEAN" => DataType::Boolean,

            "DATE" => DataType::Date,
            "DATE32" => DataType::Date32,
            "TIME" => {
                let precision = self.parse_optional_precision()?;
                DataType::Time(precision, self.parse_timezone_info())
            }
            "TIMETZ" => DataType::Time(self.parse_optional_precision()?, TimezoneInfo::Tz),
            "DATETIME" => DataType::Datetime(self.parse_optional_precision()?),
            "DATETIME64" => {
                self.expect_token(&Token::LParen)?;
                let precision = self.parse_literal_uint()?;
                let time_zone = if self.next_if_token(&Token::Comma) {
                    Some(self.parse_literal_string()?)
                } else {
                    None
                };
                self.expect_token(&Token::RParen)?;
                DataType::Datetime64(precision, time_zone)
            }
            "TIMESTAMP" => {
                let precision = self.parse_optional_precision()?;
                DataType::Timestamp(precision, self.parse_timezone_info())
            }
            "TIMESTAMPTZ" => {
                DataType::Timestamp(self.parse_optional_precision()?, TimezoneInfo::Tz)
            }
            "TIMESTAMP_NTZ" => DataType::TimestampNtz,
            "INTERVAL" => DataType::Interval,

            "JSON" => DataType::Json,
            "JSONB" => DataType::Jsonb,
            "VARIANT" => DataType::Variant,
            "OBJECT" => DataType::Object,
            "REGCLASS" => DataType::Regclass,

            "ARRAY" => {
                if self.next_if_token(&Token::Lt) {
                    let inner = self.parse_data_type()?;
                    self.expect_closing_angle()?;
                    DataType::Array(ArrayElemTypeDef::AngleBracket(Box::new(inner)))
                } else if self.next_if_token(&Token::LParen) {
                    let inner = self.parse_data_type()?;
                    self.expect_token(&Token::RParen)?;
                    DataType::Array(ArrayElemTypeDef::Parenthesis(Box::new(inner)))
                } else {
                    DataType::Array(ArrayElemTypeDef::None)
                }
            }
            "MAP" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let key = self.parse_data_type()?;
                self.expect_token(&Token::Comma)?;
                let value = self.parse_data_type()?;
                self.expect_token(&Token::RParen)?;
                DataType::Map(Box::new(key), Box::new(value))
            }
            "TUPLE" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let fields = self.parse_comma_separated(Parser::parse_struct_field)?;
                self.expect_token(&Token::RParen)?;
                DataType::Tuple(fields)
            }
            "STRUCT" if self.next_if_token(&Token::Lt) => DataType::Struct(
                self.parse_angle_bracket_fields()?,
                StructBracketKind::AngleBrackets,
            ),
            "STRUCT" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let fields = self.parse_comma_separated(Parser::parse_struct_field)?;
                self.expect_token(&Token::RParen)?;
                DataType::Struct(fields, StructBracketKind::Parentheses)
            }
            "UNION" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let fields = self.parse_comma_separated(|p| {
                    let field_name = p.parse_identifier()?;
                    let field_type = p.parse_data_type()?;
                    Ok(UnionField {
                        field_name,
                        field_type,
                    })
                })?;
                self.expect_token(&Token::RParen)?;
                DataType::Union(fields)
            }
            "ENUM" | "ENUM8" | "ENUM16" if self.peek_token() == &Token::LParen => {
                let bits = match keyword.as_str() {
                    "ENUM8" => Some(8),
                    "ENUM16" => Some(16),
                    _ => None,
                };
                self.index += 1;
                let members = self.parse_comma_separated(|p| {
                    let name = p.parse_literal_string()?;
                    if p.next_if_token(&Token::Eq) {
                        Ok(EnumMember::NamedValue(name, p.parse_expr()?))
                    } else {
                        Ok(EnumMember::Name(name))
                    }
                })?;
                self.expect_token(&Token::RParen)?;
                DataType::Enum(members, bits)
            }
            "SET" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let members = self.parse_comma_separated(Parser::parse_literal_string)?;
                self.expect_token(&Token::RParen)?;
                DataType::Set(members)
            }
            "NULLABLE" | "LOWCARDINALITY" if self.peek_token() == &Token::LParen => {
                self.index += 1;
                let inner = Box::new(self.parse_data_type()?);
                self.expect_token(&Token::RParen)?;
                if keyword == "NULLABLE" {
                    DataType::Nullable(inner)
                } else {
                    DataType::LowCardinality(inner)
                }
            }
            _ => {
                self.index -= 1;
                return self.parse_custom_type();
            }
        };
        Ok(data_type)
    }

    /// An unknown type name with its modifiers kept as text.
    fn parse_custom_type(&mut self) -> PResult<DataType> {
        let name = self.parse_object_name()?;
        let mut modifiers = vec![];
        if self.next_if_token(&Token::LParen) {
            let mut depth = 0;
            let mut start = self.index;
            loop {
                match self.peek_token() {
                    Token::EOF => return self.expected(")"),
                    Token::LParen => depth += 1,
                    Token::RParen if depth == 0 => break,
                    Token::RParen => depth -= 1,
                    Token::Comma if depth == 0 => {
                        modifiers.push(render_tokens(&self.tokens[start..self.index]));
                        start = self.index + 1;
                    }
                    _ => {}
                }
                self.index += 1;
            }
            modifiers.push(render_tokens(&self.tokens[start..self.index]));
            self.index += 1;
        }
        Ok(DataType::Custom(name, modifiers))
    }

    fn parse_timezone_info(&mut self) -> TimezoneInfo {
        if self.next_if_keywords(&["WITH", "TIME", "ZONE"]) {
            TimezoneInfo::WithTimeZone
        } else if self.next_if_keywords(&["WITHOUT", "TIME", "ZONE"]) {
            TimezoneInfo::WithoutTimeZone
        } else {
            TimezoneInfo::None
        }
    }

    fn parse_optional_character_length(&mut self) -> PResult<Option<CharacterLength>> {
        if !self.next_if_token(&Token::LParen) {
            return Ok(None);
        }
        let length = if self.next_if_keyword("MAX") {
            CharacterLength::Max
        } else {
            let length = self.parse_literal_uint()?;
            let unit = if self.next_if_keyword("CHARACTERS") {
                Some(CharLengthUnits::Characters)
            } else if self.next_if_keyword("OCTETS") {
                Some(CharLengthUnits::Octets)
            } else {
                None
            };
            CharacterLength::IntegerLength { length, unit }
        };
        self.expect_token(&Token::RParen)?;
        Ok(Some(length))
    }

    fn parse_optional_binary_length(&mut self) -> PResult<Option<BinaryLength>> {
        if !self.next_if_token(&Token::LParen) {
            return Ok(None);
        }
        let length = if self.next_if_keyword("MAX") {
            BinaryLength::Max
        } else {
            BinaryLength::IntegerLength {
                length: self.parse_literal_uint()?,
            }
        };
        self.expect_token(&Token::RParen)?;
        Ok(Some(length))
    }

    /// `(precision)` or `(precision, scale)`; the scale may be negative.
    fn parse_exact_number_info(&mut self) -> PResult<ExactNumberInfo> {
        if !self.next_if_token(&Token::LParen) {
            return Ok(ExactNumberInfo::None);
        }
        let precision = self.parse_literal_uint()?;
        let info = if self.next_if_token(&Token::Comma) {
            let negative = self.next_if_token(&Token::Minus);
            let scale = self.parse_literal_uint()? as i64;
            ExactNumberInfo::PrecisionAndScale(precision, if negative { -scale } else { scale })
        } else {
            ExactNumberInfo::Precision(precision)
        };
        self.expect_token(&Token::RParen)?;
        Ok(info)
    }

    /// Called after `<`; consumes the closing `>`.
    pub(super) fn parse_angle_bracket_fields(&mut self) -> PResult<Vec<StructField>> {
        if self.next_if_token(&Token::Gt) {
            return Ok(vec![]);
        }
        let fields = self.parse_comma_separated(Parser::parse_struct_field)?;
        self.expect_closing_angle()?;
        Ok(fields)
    }

    /// A field type, named when two words lead, as in `a INT64`.
    fn parse_struct_field(&mut self) -> PResult<StructField> {
        let named = self.peek_token().word().is_some() && self.peek_nth(1).token.word().is_some();
        let field_name = if named {
            Some(self.parse_identifier()?)
        } else {
            None
        };
        Ok(StructField {
            field_name,
            field_type: self.parse_data_type()?,
        })
    }

    /// Consumes a `>`, splitting a `>>` token that closes two nested
    /// brackets.
    fn expect_closing_angle(&mut self) -> PResult<()> {
        if self.peek_token() == &Token::ShiftRight {
            self.tokens[self.index].token = Token::Gt;
            return Ok(());
        }
        self.expect_token(&Token::Gt)
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{DataType, Expr, SelectItem, SetExpr, Statement};
    use crate::dialect::Dialect;
    use crate::parser::parse_sql;

    fn cast_type(dialect: Dialect, ty: &str) -> DataType {
        let sql = format!("SELECT CAST(x AS {})", ty);
        let statements = match parse_sql(dialect, &sql, 50) {
            Ok(statements) => statements,
            Err(err) => panic!("parsing {:?} failed: {}", sql, err),
        };
        let select = match &statements[0] {
            Statement::Query(query) => match query.body.as_ref() {
                SetExpr::Select(select) => select.clone(),
                other => panic!("not a select: {:?}", other),
            },
            other => panic!("not a query: {:?}", other),
        };
        match &select.projection[0] {
            SelectItem::UnnamedExpr(Expr::Cast { data_type, .. }) => data_type.clone(),
            other => panic!("not a cast: {:?}", other),
        }
    }

    macro_rules! test_data_type {
        ($($name:ident: ($dialect:expr, $value:expr),)*) => {
            $(
                #[test]
                fn $name() {
                    assert_eq!($value, cast_type($dialect, $value).to_string());
                }
            )*
        }
    }

    test_data_type! {
        character_varying: (Dialect::Generic, "CHARACTER VARYING(20)"),
        varchar_max: (Dialect::MsSql, "VARCHAR(MAX)"),
        char_units: (Dialect::Generic, "CHAR(10 OCTETS)"),
        clob: (Dialect::Generic, "CHARACTER LARGE OBJECT(1000)"),
        numeric_negative_scale: (Dialect::Generic, "NUMERIC(10, -2)"),
        unsigned_int: (Dialect::MySql, "INT(11) UNSIGNED"),
        double_precision: (Dialect::PostgreSql, "DOUBLE PRECISION"),
        timestamp_with_tz: (Dialect::PostgreSql, "TIMESTAMP(3) WITH TIME ZONE"),
        time_without_tz: (Dialect::PostgreSql, "TIME WITHOUT TIME ZONE"),
        timestamptz: (Dialect::PostgreSql, "TIMESTAMPTZ"),
        timestamptz_precision: (Dialect::PostgreSql, "TIMESTAMPTZ(6)"),
        square_array: (Dialect::PostgreSql, "INTEGER[][3]"),
        angle_array: (Dialect::BigQuery, "ARRAY<STRUCT<a INT64, b ARRAY<STRING>>>"),
        clickhouse_nested: (Dialect::ClickHouse, "Map(STRING, Array(Nullable(Int32)))"),
        clickhouse_tuple: (Dialect::ClickHouse, "Tuple(a STRING, UInt8)"),
        datetime64: (Dialect::ClickHouse, "DateTime64(3, 'UTC')"),
        mysql_enum: (Dialect::MySql, "ENUM('a', 'b')"),
        clickhouse_enum: (Dialect::ClickHouse, "ENUM8('a' = 1, 'b' = 2)"),
        mysql_set: (Dialect::MySql, "SET('x', 'y')"),
        custom_with_modifiers: (Dialect::PostgreSql, "geometry(Point, 4326)"),
        custom_qualified: (Dialect::PostgreSql, "public.my_type"),
    }

    #[test]
    fn shift_right_closes_two_brackets() {
        let ty = cast_type(Dialect::BigQuery, "ARRAY<ARRAY<INT64>>");
        assert_eq!("ARRAY<ARRAY<INT64>>", ty.to_string());
    }

    #[test]
    fn missing_type_is_an_error() {
        let err = parse_sql(Dialect::Generic, "SELECT CAST(x AS )", 50).unwrap_err();
        assert_eq!("Expected: a data type, found: )", err.message);
    }
}
