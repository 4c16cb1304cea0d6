use std::error::Error;

use tokio_postgres::types::{IsNull, ToSql, Type, to_sql_checked};
use tokio_util::bytes;

use crate::values::DbValue;

/// Borrowed parameter list in the form `tokio-postgres` wants.
pub struct Params<'a> {
    references: Vec<&'a (dyn ToSql + Sync)>,
}

impl<'a> Params<'a> {
    #[must_use]
    pub fn convert(params: &'a [DbValue]) -> Params<'a> {
        let references: Vec<&(dyn ToSql + Sync)> =
            params.iter().map(|p| p as &(dyn ToSql + Sync)).collect();
        Params { references }
    }

    #[must_use]
    pub fn as_refs(&self) -> &[&(dyn ToSql + Sync)] {
        &self.references
    }
}

impl ToSql for DbValue {
    fn to_sql(
        &self,
        ty: &Type,
        out: &mut bytes::BytesMut,
    ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            // Narrow integers to the statement's declared width; an
            // out-of-range value is an error, not a silent truncation.
            DbValue::Int(i) => match *ty {
                Type::INT2 => i16::try_from(*i)
                    .map_err(|_| format!("integer {i} out of range for int2"))?
                    .to_sql(ty, out),
                Type::INT4 => i32::try_from(*i)
                    .map_err(|_| format!("integer {i} out of range for int4"))?
                    .to_sql(ty, out),
                _ => (*i).to_sql(ty, out),
            },
            DbValue::Float(f) => (*f).to_sql(ty, out),
            DbValue::Text(s) => s.to_sql(ty, out),
            DbValue::Bool(b) => (*b).to_sql(ty, out),
            DbValue::Date(d) => d.to_sql(ty, out),
            DbValue::Null => Ok(IsNull::Yes),
        }
    }

    fn accepts(ty: &Type) -> bool {
        matches!(
            *ty,
            Type::INT2
                | Type::INT4
                | Type::INT8
                | Type::FLOAT4
                | Type::FLOAT8
                | Type::TEXT
                | Type::VARCHAR
                | Type::CHAR
                | Type::NAME
                | Type::BOOL
                | Type::DATE
        )
    }

    to_sql_checked!();
}
