//! Call contexts and the context stack.
//!
//! One [`CallContext`] is one function activation: a stack of scopes plus
//! a link to the context in which the function was *defined* (not called).
//! The link is an index into the [`CallStack`], which is safe because
//! contexts push and pop in LIFO order and a definition site is always
//! deeper in the stack than its activation.

use kitec_par::ast::{FuncDef, StructDef, VariantDef};

use crate::scope::Scope;
use crate::value::Reference;

pub struct CallContext<'ast> {
    scopes: Vec<Scope<'ast>>,
    parent: Option<usize>,
}

impl<'ast> CallContext<'ast> {
    /// A fresh context with one (empty) scope. `parent` is the stack index
    /// of the definition-site context, or `None` for the global context.
    pub fn new(parent: Option<usize>) -> Self {
        Self {
            scopes: vec![Scope::new()],
            parent,
        }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(Scope::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// The innermost scope, where new definitions land.
    pub fn innermost_mut(&mut self) -> &mut Scope<'ast> {
        self.scopes
            .last_mut()
            .unwrap_or_else(|| unreachable!("a call context always has a scope"))
    }

    fn variable(&self, name: &str) -> Option<Reference<'ast>> {
        self.scopes.iter().rev().find_map(|scope| scope.variable(name))
    }

    fn function(&self, name: &str) -> Option<&'ast FuncDef> {
        self.scopes.iter().rev().find_map(|scope| scope.function(name))
    }

    fn struct_def(&self, name: &str) -> Option<&'ast StructDef> {
        self.scopes.iter().rev().find_map(|scope| scope.struct_def(name))
    }

    fn variant_def(&self, name: &str) -> Option<&'ast VariantDef> {
        self.scopes.iter().rev().find_map(|scope| scope.variant_def(name))
    }
}

/// The interpreter's stack of call contexts. The bottom entry is the
/// global context and is never popped.
pub struct CallStack<'ast> {
    contexts: Vec<CallContext<'ast>>,
}

impl<'ast> CallStack<'ast> {
    pub fn new() -> Self {
        Self {
            contexts: vec![CallContext::new(None)],
        }
    }

    /// Number of live contexts, the global one included.
    pub fn depth(&self) -> usize {
        self.contexts.len()
    }

    /// Index of the currently executing context.
    pub fn current_index(&self) -> usize {
        self.contexts.len() - 1
    }

    pub fn current_mut(&mut self) -> &mut CallContext<'ast> {
        let index = self.current_index();
        &mut self.contexts[index]
    }

    /// Pushes an activation whose name resolution continues in the
    /// definition-site context at `parent`.
    pub fn push_context(&mut self, parent: usize) {
        self.contexts.push(CallContext::new(Some(parent)));
    }

    pub fn pop_context(&mut self) {
        debug_assert!(self.contexts.len() > 1, "the global context stays");
        self.contexts.pop();
    }

    /// Resolves a variable: innermost scope first within the current
    /// context, then along the definition-site chain.
    pub fn variable(&self, name: &str) -> Option<Reference<'ast>> {
        self.walk(|ctx| ctx.variable(name))
    }

    /// Resolves a function, returning it together with the index of the
    /// context it was found in - the parent for its activations.
    pub fn function(&self, name: &str) -> Option<(&'ast FuncDef, usize)> {
        let mut index = self.current_index();
        loop {
            let ctx = &self.contexts[index];
            if let Some(func) = ctx.function(name) {
                return Some((func, index));
            }
            index = ctx.parent?;
        }
    }

    pub fn struct_def(&self, name: &str) -> Option<&'ast StructDef> {
        self.walk(|ctx| ctx.struct_def(name))
    }

    pub fn variant_def(&self, name: &str) -> Option<&'ast VariantDef> {
        self.walk(|ctx| ctx.variant_def(name))
    }

    fn walk<T>(&self, mut lookup: impl FnMut(&CallContext<'ast>) -> Option<T>) -> Option<T> {
        let mut index = self.current_index();
        loop {
            let ctx = &self.contexts[index];
            if let Some(found) = lookup(ctx) {
                return Some(found);
            }
            index = ctx.parent?;
        }
    }
}

impl<'ast> Default for CallStack<'ast> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{new_cell, Value};
    use kitec_util::Position;

    fn define(stack: &mut CallStack<'_>, name: &str, value: u32) {
        stack
            .current_mut()
            .innermost_mut()
            .define_variable(name, new_cell(Value::Int(value)), false, Position::default())
            .unwrap();
    }

    fn read(stack: &CallStack<'_>, name: &str) -> Option<u32> {
        let reference = stack.variable(name)?;
        let result = match *reference.cell.borrow() {
            Value::Int(n) => Some(n),
            _ => None,
        };
        result
    }

    #[test]
    fn test_inner_scopes_shadow_outer_ones() {
        let mut stack = CallStack::new();
        define(&mut stack, "x", 1);
        stack.current_mut().push_scope();
        define(&mut stack, "x", 2);
        assert_eq!(read(&stack, "x"), Some(2));
        stack.current_mut().pop_scope();
        assert_eq!(read(&stack, "x"), Some(1));
    }

    #[test]
    fn test_lookup_follows_the_definition_site_chain() {
        let mut stack = CallStack::new();
        define(&mut stack, "global", 5);

        // An activation parented to the global context sees globals...
        stack.push_context(0);
        assert_eq!(read(&stack, "global"), Some(5));
        define(&mut stack, "local", 7);

        // ...but an activation parented past it does not see its locals.
        stack.push_context(0);
        assert_eq!(read(&stack, "local"), None);
        assert_eq!(read(&stack, "global"), Some(5));

        stack.pop_context();
        stack.pop_context();
    }

    #[test]
    fn test_caller_locals_are_invisible_to_callees() {
        let mut stack = CallStack::new();
        stack.push_context(0);
        define(&mut stack, "caller_local", 1);

        // Callee defined at the global context: parent skips the caller.
        stack.push_context(0);
        assert_eq!(read(&stack, "caller_local"), None);
    }
}
