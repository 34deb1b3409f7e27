//! Statement execution and function calls.

use std::io::Write;

use kitec_par::ast::{
    Assignment, FuncCall, FuncDef, IfStmt, LValue, PrintStmt, Program, ReturnStmt, Stmt,
    StructDef, VarDef, WhileStmt,
};
use kitec_util::{BuiltInType, KiteError, Position, Result, RetType, TypeSpec};

use crate::context::CallStack;
use crate::value::{new_cell, Evaluated, NamedStructObj, Reference, StructObj, Value, ValueCell};

/// Hard bound on live call contexts (the global one included). Exceeding
/// it raises `MaxRecursionDepth` at the call site.
pub const MAX_RECURSION_DEPTH: usize = 200;

/// Control-flow signal produced by statement execution. `Return` unwinds
/// to the enclosing function call without being an error.
pub enum Flow<'ast> {
    Normal,
    Return(Option<Value<'ast>>),
}

/// The tree-walking interpreter.
///
/// `'ast` borrows the program for the interpreter's lifetime; `out`
/// receives `print` output.
pub struct Interpreter<'ast, W: Write> {
    pub(crate) stack: CallStack<'ast>,
    out: W,
}

impl<'ast, W: Write> Interpreter<'ast, W> {
    pub fn new(out: W) -> Self {
        Self {
            stack: CallStack::new(),
            out,
        }
    }

    /// Executes the program's statements in order. A top-level `return`
    /// ends execution early.
    pub fn interpret(&mut self, program: &'ast Program) -> Result<()> {
        self.exec_statements(&program.statements)?;
        Ok(())
    }

    fn exec_statements(&mut self, stmts: &'ast [Stmt]) -> Result<Flow<'ast>> {
        for stmt in stmts {
            if let Flow::Return(value) = self.exec_statement(stmt)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_statement(&mut self, stmt: &'ast Stmt) -> Result<Flow<'ast>> {
        match stmt {
            Stmt::If(stmt) => self.exec_if(stmt),
            Stmt::While(stmt) => self.exec_while(stmt),
            Stmt::Return(stmt) => self.exec_return(stmt),
            Stmt::Print(stmt) => self.exec_print(stmt),
            Stmt::VarDef(stmt) => self.exec_var_def(stmt),
            Stmt::Assignment(stmt) => self.exec_assignment(stmt),
            Stmt::FuncCall(call) => {
                // Statement position: any returned value is discarded.
                self.call_function(call)?;
                Ok(Flow::Normal)
            }
            Stmt::FuncDef(def) => {
                self.stack.current_mut().innermost_mut().define_function(def)?;
                Ok(Flow::Normal)
            }
            Stmt::StructDef(def) => {
                self.stack.current_mut().innermost_mut().define_struct(def)?;
                Ok(Flow::Normal)
            }
            Stmt::VariantDef(def) => {
                self.stack.current_mut().innermost_mut().define_variant(def)?;
                Ok(Flow::Normal)
            }
        }
    }

    fn exec_if(&mut self, stmt: &'ast IfStmt) -> Result<Flow<'ast>> {
        if self.eval_bool(&stmt.condition)? {
            self.exec_block(&stmt.body)
        } else {
            Ok(Flow::Normal)
        }
    }

    fn exec_while(&mut self, stmt: &'ast WhileStmt) -> Result<Flow<'ast>> {
        while self.eval_bool(&stmt.condition)? {
            if let Flow::Return(value) = self.exec_block(&stmt.body)? {
                return Ok(Flow::Return(value));
            }
        }
        Ok(Flow::Normal)
    }

    /// Runs a statement list in a fresh scope, popping it on every path.
    fn exec_block(&mut self, body: &'ast [Stmt]) -> Result<Flow<'ast>> {
        self.stack.current_mut().push_scope();
        let result = self.exec_statements(body);
        self.stack.current_mut().pop_scope();
        result
    }

    fn exec_return(&mut self, stmt: &'ast ReturnStmt) -> Result<Flow<'ast>> {
        let value = match &stmt.expression {
            Some(expr) => Some(self.eval_value(expr)?),
            None => None,
        };
        Ok(Flow::Return(value))
    }

    fn exec_print(&mut self, stmt: &'ast PrintStmt) -> Result<Flow<'ast>> {
        // Sink failures are not program errors.
        match &stmt.expression {
            Some(expr) => {
                let value = self.eval_value(expr)?;
                let _ = writeln!(self.out, "{value}");
            }
            None => {
                let _ = writeln!(self.out);
            }
        }
        Ok(Flow::Normal)
    }

    fn exec_var_def(&mut self, def: &'ast VarDef) -> Result<Flow<'ast>> {
        let value = self.eval_value(&def.init)?;
        let value = self.coerce(value, &def.spec, def.position)?;

        self.stack.current_mut().innermost_mut().define_variable(
            &def.name,
            new_cell(value),
            def.is_const,
            def.position,
        )?;
        Ok(Flow::Normal)
    }

    fn exec_assignment(&mut self, stmt: &'ast Assignment) -> Result<Flow<'ast>> {
        let target = self.resolve_lvalue(&stmt.lhs, stmt.position)?;
        if target.is_const {
            return Err(KiteError::ConstViolation {
                position: stmt.position,
            });
        }

        let value = self.eval_value(&stmt.rhs)?;
        let spec = {
            let current = target.cell.borrow();
            runtime_spec(&current)
        };
        let value = match spec {
            Some(spec) => self.coerce(value, &spec, stmt.position)?,
            None => value,
        };

        *target.cell.borrow_mut() = value;
        Ok(Flow::Normal)
    }

    /// Resolves an assignment target to a reference, walking field chains
    /// through named struct values.
    pub(crate) fn resolve_lvalue(
        &self,
        lvalue: &LValue,
        position: Position,
    ) -> Result<Reference<'ast>> {
        match lvalue {
            LValue::Variable(name) => {
                self.stack
                    .variable(name)
                    .ok_or_else(|| KiteError::SymbolNotFound {
                        position,
                        kind: "variable",
                        name: name.clone(),
                    })
            }
            LValue::Field(inner, field) => {
                let base = self.resolve_lvalue(inner, position)?;
                let cell = {
                    let value = base.cell.borrow();
                    let Value::NamedStruct(obj) = &*value else {
                        return Err(KiteError::type_mismatch(
                            position,
                            "named struct",
                            value.type_name(),
                        ));
                    };
                    obj.field(field).ok_or_else(|| KiteError::InvalidField {
                        position,
                        field: field.clone(),
                    })?
                };
                Ok(Reference {
                    cell,
                    is_const: base.is_const,
                })
            }
        }
    }

    /// Checks a value against a declared type, binding anonymous struct
    /// values to struct definitions on the way. No implicit scalar
    /// conversion happens here; `as` is the only conversion form.
    pub(crate) fn coerce(
        &self,
        value: Value<'ast>,
        spec: &TypeSpec,
        position: Position,
    ) -> Result<Value<'ast>> {
        if value.matches_spec(spec) {
            return Ok(value);
        }

        if let TypeSpec::Named(name) = spec {
            return match value {
                Value::Struct(obj) => match self.stack.struct_def(name) {
                    Some(def) => self.bind_struct(obj, def, position),
                    None => Err(self.unknown_or_mismatched(name, "anonymous struct", position)),
                },
                other => Err(self.unknown_or_mismatched(name, &other.type_name(), position)),
            };
        }

        Err(KiteError::type_mismatch(position, spec, value.type_name()))
    }

    /// `TypeMismatch` if the declared name resolves to a struct or
    /// variant, `SymbolNotFound` otherwise.
    fn unknown_or_mismatched(
        &self,
        name: &str,
        actual: &str,
        position: Position,
    ) -> KiteError {
        if self.stack.struct_def(name).is_some() || self.stack.variant_def(name).is_some() {
            KiteError::type_mismatch(position, name, actual)
        } else {
            KiteError::SymbolNotFound {
                position,
                kind: "type",
                name: name.to_string(),
            }
        }
    }

    /// Binds an anonymous struct value to a struct definition: the field
    /// counts must agree and every member is coerced to its declared
    /// field type (recursively for nested initializers).
    fn bind_struct(
        &self,
        obj: StructObj<'ast>,
        def: &'ast StructDef,
        position: Position,
    ) -> Result<Value<'ast>> {
        if obj.values.len() != def.fields.len() {
            return Err(KiteError::InvalidFieldCount {
                position,
                expected: def.fields.len(),
                actual: obj.values.len(),
            });
        }

        let mut values = Vec::with_capacity(obj.values.len());
        for (cell, field) in obj.values.into_iter().zip(&def.fields) {
            let value = std::rc::Rc::try_unwrap(cell)
                .map(|refcell| refcell.into_inner())
                .unwrap_or_else(|shared| shared.borrow().deep_clone());
            let value = self.coerce(value, &field.spec, position)?;
            values.push(new_cell(value));
        }

        Ok(Value::NamedStruct(NamedStructObj { values, def }))
    }

    /// Performs a function call: resolution, arity and type checks,
    /// parameter binding, body execution and return-type enforcement.
    ///
    /// Returns the produced value, or `None` for void functions.
    pub(crate) fn call_function(&mut self, call: &'ast FuncCall) -> Result<Option<Value<'ast>>> {
        let (func, def_ctx) =
            self.stack
                .function(&call.name)
                .ok_or_else(|| KiteError::SymbolNotFound {
                    position: call.position,
                    kind: "function",
                    name: call.name.clone(),
                })?;

        if call.arguments.len() != func.parameters.len() {
            return Err(KiteError::syntax(
                call.position,
                format!(
                    "function {} takes {} arguments but {} were given",
                    func.name,
                    func.parameters.len(),
                    call.arguments.len()
                ),
            ));
        }

        // Arguments are evaluated left to right in the caller's context.
        let mut bindings: Vec<(&'ast str, ValueCell<'ast>)> = Vec::new();
        for (arg, param) in call.arguments.iter().zip(&func.parameters) {
            let cell = if param.is_ref {
                if !arg.is_ref {
                    return Err(KiteError::syntax(
                        arg.position,
                        format!("parameter {} is 'ref'; mark the argument 'ref'", param.name),
                    ));
                }
                let reference = match self.eval(&arg.expr)? {
                    Evaluated::Ref(reference) => reference,
                    Evaluated::Value(_) => {
                        return Err(KiteError::syntax(
                            arg.position,
                            "'ref' argument must be a variable or a field",
                        ));
                    }
                };
                if reference.is_const {
                    return Err(KiteError::ConstViolation {
                        position: arg.position,
                    });
                }
                {
                    let value = reference.cell.borrow();
                    if !value.matches_spec(&param.spec) {
                        return Err(KiteError::type_mismatch(
                            arg.position,
                            &param.spec,
                            value.type_name(),
                        ));
                    }
                }
                reference.cell
            } else {
                if arg.is_ref {
                    return Err(KiteError::syntax(
                        arg.position,
                        format!("parameter {} is not declared 'ref'", param.name),
                    ));
                }
                let value = self.eval_value(&arg.expr)?;
                let value = self.coerce(value, &param.spec, arg.position)?;
                new_cell(value)
            };
            bindings.push((param.name.as_str(), cell));
        }

        if self.stack.depth() >= MAX_RECURSION_DEPTH {
            return Err(KiteError::MaxRecursionDepth {
                position: call.position,
            });
        }

        self.stack.push_context(def_ctx);
        let result = self.run_function_body(func, bindings);
        self.stack.pop_context();

        let flow = result?;
        self.check_return(func, flow, call.position)
    }

    fn run_function_body(
        &mut self,
        func: &'ast FuncDef,
        bindings: Vec<(&'ast str, ValueCell<'ast>)>,
    ) -> Result<Flow<'ast>> {
        for (name, cell) in bindings {
            self.stack
                .current_mut()
                .innermost_mut()
                .define_variable(name, cell, false, func.position)?;
        }
        self.exec_statements(&func.body)
    }

    /// Enforces the declared return type once the body has finished.
    fn check_return(
        &self,
        func: &'ast FuncDef,
        flow: Flow<'ast>,
        call_position: Position,
    ) -> Result<Option<Value<'ast>>> {
        let returned = match flow {
            Flow::Normal | Flow::Return(None) => None,
            Flow::Return(Some(value)) => Some(value),
        };

        match (&func.ret_type, returned) {
            (RetType::Void, None) => Ok(None),
            (RetType::Void, Some(value)) => Err(KiteError::ReturnTypeMismatch {
                position: call_position,
                expected: RetType::Void.to_string(),
                actual: value.type_name(),
            }),
            (RetType::Value(spec), None) => Err(KiteError::ReturnTypeMismatch {
                position: call_position,
                expected: spec.to_string(),
                actual: RetType::Void.to_string(),
            }),
            (RetType::Value(spec), Some(value)) => {
                if value.matches_spec(spec) {
                    Ok(Some(value))
                } else {
                    Err(KiteError::ReturnTypeMismatch {
                        position: call_position,
                        expected: spec.to_string(),
                        actual: value.type_name(),
                    })
                }
            }
        }
    }
}

/// The type designator of a cell's current contents, used to type-check
/// assignments. Anonymous struct values never rest in cells, so they have
/// no designator.
fn runtime_spec(value: &Value<'_>) -> Option<TypeSpec> {
    match value {
        Value::Int(_) => Some(TypeSpec::BuiltIn(BuiltInType::Int)),
        Value::Float(_) => Some(TypeSpec::BuiltIn(BuiltInType::Float)),
        Value::Bool(_) => Some(TypeSpec::BuiltIn(BuiltInType::Bool)),
        Value::Str(_) => Some(TypeSpec::BuiltIn(BuiltInType::Str)),
        Value::NamedStruct(obj) => Some(TypeSpec::Named(obj.def.name.clone())),
        Value::Variant(obj) => Some(TypeSpec::Named(obj.def.name.clone())),
        Value::Struct(_) => None,
    }
}
