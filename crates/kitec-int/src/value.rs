//! Runtime values.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use kitec_par::ast::{StructDef, VariantDef};
use kitec_util::{BuiltInType, TypeSpec};

/// Mutable storage for one runtime value, shared between everything that
/// references it (scope bindings, struct members, `ref` parameters).
pub type ValueCell<'ast> = Rc<RefCell<Value<'ast>>>;

/// Allocates a fresh cell holding `value`.
pub fn new_cell(value: Value<'_>) -> ValueCell<'_> {
    Rc::new(RefCell::new(value))
}

/// A runtime value. Scalars are stored inline; aggregates store their
/// members behind cells so that field accesses can alias them.
#[derive(Debug)]
pub enum Value<'ast> {
    Int(u32),
    Float(f32),
    Bool(bool),
    Str(String),
    /// An anonymous struct produced by an initializer expression. It only
    /// lives until the enclosing definition or assignment binds it to a
    /// declared struct type.
    Struct(StructObj<'ast>),
    NamedStruct(NamedStructObj<'ast>),
    Variant(VariantObj<'ast>),
}

/// Ordered member cells of an anonymous struct value.
#[derive(Debug)]
pub struct StructObj<'ast> {
    pub values: Vec<ValueCell<'ast>>,
}

/// A struct value bound to its definition.
#[derive(Debug)]
pub struct NamedStructObj<'ast> {
    pub values: Vec<ValueCell<'ast>>,
    pub def: &'ast StructDef,
}

impl<'ast> NamedStructObj<'ast> {
    /// The cell of the field named `name`, resolved positionally through
    /// the struct definition.
    pub fn field(&self, name: &str) -> Option<ValueCell<'ast>> {
        let index = self.def.fields.iter().position(|field| field.name == name)?;
        self.values.get(index).cloned()
    }
}

/// A variant instance: the wrapped payload plus its variant definition.
#[derive(Debug)]
pub struct VariantObj<'ast> {
    pub value: ValueCell<'ast>,
    pub def: &'ast VariantDef,
}

impl<'ast> Value<'ast> {
    /// The value's type rendered for diagnostics.
    pub fn type_name(&self) -> String {
        match self {
            Value::Int(_) => BuiltInType::Int.to_string(),
            Value::Float(_) => BuiltInType::Float.to_string(),
            Value::Bool(_) => BuiltInType::Bool.to_string(),
            Value::Str(_) => BuiltInType::Str.to_string(),
            Value::Struct(_) => "anonymous struct".to_string(),
            Value::NamedStruct(obj) => obj.def.name.clone(),
            Value::Variant(obj) => obj.def.name.clone(),
        }
    }

    /// Whether this value's runtime type is exactly the designated type.
    ///
    /// A variant instance matches its own variant's name; checking the
    /// payload is the caller's concern (`is` does so explicitly).
    pub fn matches_spec(&self, spec: &TypeSpec) -> bool {
        match (self, spec) {
            (Value::Int(_), TypeSpec::BuiltIn(BuiltInType::Int))
            | (Value::Float(_), TypeSpec::BuiltIn(BuiltInType::Float))
            | (Value::Bool(_), TypeSpec::BuiltIn(BuiltInType::Bool))
            | (Value::Str(_), TypeSpec::BuiltIn(BuiltInType::Str)) => true,
            (Value::NamedStruct(obj), TypeSpec::Named(name)) => obj.def.name == *name,
            (Value::Variant(obj), TypeSpec::Named(name)) => obj.def.name == *name,
            _ => false,
        }
    }

    /// Copies the value, allocating fresh cells for every aggregate
    /// member. Values form trees; sharing only ever happens through
    /// explicit `ref` bindings, never through copies.
    pub fn deep_clone(&self) -> Value<'ast> {
        match self {
            Value::Int(n) => Value::Int(*n),
            Value::Float(f) => Value::Float(*f),
            Value::Bool(b) => Value::Bool(*b),
            Value::Str(s) => Value::Str(s.clone()),
            Value::Struct(obj) => Value::Struct(StructObj {
                values: clone_cells(&obj.values),
            }),
            Value::NamedStruct(obj) => Value::NamedStruct(NamedStructObj {
                values: clone_cells(&obj.values),
                def: obj.def,
            }),
            Value::Variant(obj) => Value::Variant(VariantObj {
                value: new_cell(obj.value.borrow().deep_clone()),
                def: obj.def,
            }),
        }
    }
}

fn clone_cells<'ast>(cells: &[ValueCell<'ast>]) -> Vec<ValueCell<'ast>> {
    cells
        .iter()
        .map(|cell| new_cell(cell.borrow().deep_clone()))
        .collect()
}

impl fmt::Display for Value<'_> {
    /// The `print` rendering: scalars via their standard formatting,
    /// strings verbatim, structs as `{a, b}`, variants as their payload.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Struct(StructObj { values })
            | Value::NamedStruct(NamedStructObj { values, .. }) => {
                f.write_str("{")?;
                for (i, cell) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    cell.borrow().fmt(f)?;
                }
                f.write_str("}")
            }
            Value::Variant(obj) => obj.value.borrow().fmt(f),
        }
    }
}

/// A shared, possibly-const handle to a value cell - the unit of binding
/// for every variable.
#[derive(Clone)]
pub struct Reference<'ast> {
    pub cell: ValueCell<'ast>,
    pub is_const: bool,
}

/// The result of evaluating an expression: either a temporary value or a
/// reference that preserves l-value-ness (variable and field accesses).
pub enum Evaluated<'ast> {
    Value(Value<'ast>),
    Ref(Reference<'ast>),
}

impl<'ast> Evaluated<'ast> {
    /// Collapses to a plain value, copying out of the cell for
    /// references.
    pub fn into_value(self) -> Value<'ast> {
        match self {
            Evaluated::Value(value) => value,
            Evaluated::Ref(reference) => reference.cell.borrow().deep_clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kitec_par::ast::Field;
    use kitec_util::Position;

    fn point_def() -> StructDef {
        StructDef {
            name: "Point".into(),
            fields: vec![
                Field {
                    spec: TypeSpec::BuiltIn(BuiltInType::Int),
                    name: "x".into(),
                },
                Field {
                    spec: TypeSpec::BuiltIn(BuiltInType::Int),
                    name: "y".into(),
                },
            ],
            position: Position::new(1, 1),
        }
    }

    #[test]
    fn test_scalar_display_matches_print_formats() {
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::Float(2.0).to_string(), "2");
        assert_eq!(Value::Float(1.25).to_string(), "1.25");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
    }

    #[test]
    fn test_named_struct_fields_resolve_positionally() {
        let def = point_def();
        let obj = NamedStructObj {
            values: vec![new_cell(Value::Int(7)), new_cell(Value::Int(2))],
            def: &def,
        };
        assert_eq!(obj.field("y").unwrap().borrow().to_string(), "2");
        assert!(obj.field("z").is_none());
    }

    #[test]
    fn test_deep_clone_does_not_alias_members() {
        let def = point_def();
        let original = Value::NamedStruct(NamedStructObj {
            values: vec![new_cell(Value::Int(7)), new_cell(Value::Int(2))],
            def: &def,
        });
        let copy = original.deep_clone();

        if let Value::NamedStruct(obj) = &original {
            *obj.values[0].borrow_mut() = Value::Int(99);
        }
        assert_eq!(copy.to_string(), "{7, 2}");
        assert_eq!(original.to_string(), "{99, 2}");
    }

    #[test]
    fn test_spec_matching_is_exact() {
        let value = Value::Int(1);
        assert!(value.matches_spec(&TypeSpec::BuiltIn(BuiltInType::Int)));
        assert!(!value.matches_spec(&TypeSpec::BuiltIn(BuiltInType::Float)));
        assert!(!value.matches_spec(&TypeSpec::Named("Point".into())));

        let def = point_def();
        let named = Value::NamedStruct(NamedStructObj {
            values: vec![],
            def: &def,
        });
        assert!(named.matches_spec(&TypeSpec::Named("Point".into())));
        assert!(!named.matches_spec(&TypeSpec::Named("Line".into())));
    }
}
