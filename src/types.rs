use std::fmt;
use std::rc::Rc;

/// Value types of the script language. `Any` is dynamic and opaque to the
/// analyses; vectors, tables, sets and records are the aggregate types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Bool,
    Count,
    Double,
    Str,
    Addr,
    Interval,
    Vector(Box<Type>),
    Table(Box<Type>, Box<Type>),
    Set(Box<Type>),
    Record(Rc<RecordType>),
    Func,
    Any,
    Void,
}

impl Type {
    pub fn is_aggregate(&self) -> bool {
        matches!(
            self,
            Type::Vector(_) | Type::Table(_, _) | Type::Set(_) | Type::Record(_)
        )
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Type::Record(_))
    }

    pub fn as_record(&self) -> Option<&Rc<RecordType>> {
        match self {
            Type::Record(record) => Some(record),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Bool => write!(f, "bool"),
            Type::Count => write!(f, "count"),
            Type::Double => write!(f, "double"),
            Type::Str => write!(f, "string"),
            Type::Addr => write!(f, "addr"),
            Type::Interval => write!(f, "interval"),
            Type::Vector(elem) => write!(f, "vector of {}", elem),
            Type::Table(key, value) => write!(f, "table[{}] of {}", key, value),
            Type::Set(elem) => write!(f, "set[{}]", elem),
            Type::Record(record) => write!(f, "{}", record.name),
            Type::Func => write!(f, "function"),
            Type::Any => write!(f, "any"),
            Type::Void => write!(f, "void"),
        }
    }
}

/// A nominal record type with named, ordered fields.
#[derive(Debug, PartialEq, Eq)]
pub struct RecordType {
    pub name: String,
    pub fields: Vec<RecordField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    pub ty: Type,
    /// Whether the field declaration carries a default attribute, in which
    /// case the language's initialization rules define it.
    pub has_default: bool,
}

impl RecordType {
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }

    pub fn field_name(&self, index: usize) -> &str {
        &self.fields[index].name
    }

    pub fn field_type(&self, index: usize) -> &Type {
        &self.fields[index].ty
    }

    pub fn field_has_default(&self, index: usize) -> bool {
        self.fields[index].has_default
    }

    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    pub fn field_type_by_name(&self, name: &str) -> Option<&Type> {
        self.field_index(name).map(|index| self.field_type(index))
    }
}
