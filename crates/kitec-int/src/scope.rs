//! Lexical scopes.

use indexmap::IndexMap;

use kitec_par::ast::{FuncDef, StructDef, VariantDef};
use kitec_util::{KiteError, Position, Result};

use crate::value::{Reference, ValueCell};

/// One level of lexical bindings: a brace-delimited region or a function
/// frame's parameter layer.
///
/// Variables, functions, structs and variants live in separate namespaces,
/// each unique within the scope. Inserting a duplicate raises the matching
/// redefinition error.
#[derive(Default)]
pub struct Scope<'ast> {
    variables: IndexMap<String, Variable<'ast>>,
    functions: IndexMap<String, &'ast FuncDef>,
    structs: IndexMap<String, &'ast StructDef>,
    variants: IndexMap<String, &'ast VariantDef>,
}

struct Variable<'ast> {
    cell: ValueCell<'ast>,
    is_const: bool,
}

impl<'ast> Scope<'ast> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_variable(
        &mut self,
        name: &str,
        cell: ValueCell<'ast>,
        is_const: bool,
        position: Position,
    ) -> Result<()> {
        if self.variables.contains_key(name) {
            return Err(KiteError::VariableRedefinition {
                position,
                name: name.to_string(),
            });
        }
        self.variables
            .insert(name.to_string(), Variable { cell, is_const });
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<Reference<'ast>> {
        self.variables.get(name).map(|var| Reference {
            cell: var.cell.clone(),
            is_const: var.is_const,
        })
    }

    pub fn define_function(&mut self, func: &'ast FuncDef) -> Result<()> {
        if self.functions.contains_key(&func.name) {
            return Err(KiteError::FunctionRedefinition {
                position: func.position,
                name: func.name.clone(),
            });
        }
        self.functions.insert(func.name.clone(), func);
        Ok(())
    }

    pub fn function(&self, name: &str) -> Option<&'ast FuncDef> {
        self.functions.get(name).copied()
    }

    pub fn define_struct(&mut self, def: &'ast StructDef) -> Result<()> {
        if self.structs.contains_key(&def.name) {
            return Err(KiteError::StructRedefinition {
                position: def.position,
                name: def.name.clone(),
            });
        }
        self.structs.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn struct_def(&self, name: &str) -> Option<&'ast StructDef> {
        self.structs.get(name).copied()
    }

    pub fn define_variant(&mut self, def: &'ast VariantDef) -> Result<()> {
        if self.variants.contains_key(&def.name) {
            return Err(KiteError::VariantRedefinition {
                position: def.position,
                name: def.name.clone(),
            });
        }
        self.variants.insert(def.name.clone(), def);
        Ok(())
    }

    pub fn variant_def(&self, name: &str) -> Option<&'ast VariantDef> {
        self.variants.get(name).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{new_cell, Value};

    #[test]
    fn test_variable_lookup_preserves_constness() {
        let mut scope = Scope::new();
        let position = Position::new(1, 1);
        scope
            .define_variable("pi", new_cell(Value::Float(3.14)), true, position)
            .unwrap();

        let reference = scope.variable("pi").unwrap();
        assert!(reference.is_const);
        assert!(scope.variable("tau").is_none());
    }

    #[test]
    fn test_variable_redefinition_is_rejected() {
        let mut scope = Scope::new();
        let position = Position::new(2, 3);
        scope
            .define_variable("x", new_cell(Value::Int(1)), false, position)
            .unwrap();

        let err = scope
            .define_variable("x", new_cell(Value::Int(2)), false, position)
            .unwrap_err();
        assert!(matches!(err, KiteError::VariableRedefinition { .. }));
    }

    #[test]
    fn test_namespaces_are_independent() {
        let mut scope = Scope::new();
        scope
            .define_variable(
                "Point",
                new_cell(Value::Int(0)),
                false,
                Position::new(1, 1),
            )
            .unwrap();
        // A struct named like a variable is fine.
        assert!(scope.struct_def("Point").is_none());
    }
}
