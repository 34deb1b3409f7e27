//! Expression evaluation.

use std::io::Write;

use kitec_par::ast::{BinaryExpr, Expr, FieldAccessExpr, Literal, TypeExpr, UnaryExpr};
use kitec_util::{BuiltInType, KiteError, Position, Result, TypeSpec};

use crate::interpreter::Interpreter;
use crate::value::{new_cell, Evaluated, Reference, StructObj, Value, ValueCell, VariantObj};

/// The four relational operators, shared by one evaluator.
#[derive(Clone, Copy)]
enum RelOp {
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
}

impl RelOp {
    fn holds<T: PartialOrd>(self, lhs: &T, rhs: &T) -> bool {
        match self {
            RelOp::Less => lhs < rhs,
            RelOp::LessEqual => lhs <= rhs,
            RelOp::Greater => lhs > rhs,
            RelOp::GreaterEqual => lhs >= rhs,
        }
    }
}

impl<'ast, W: Write> Interpreter<'ast, W> {
    /// Evaluates an expression, preserving l-value-ness: variable and
    /// field accesses yield references, everything else yields values.
    pub(crate) fn eval(&mut self, expr: &'ast Expr) -> Result<Evaluated<'ast>> {
        match expr {
            Expr::Constant(constant) => Ok(Evaluated::Value(match &constant.value {
                Literal::Int(n) => Value::Int(*n),
                Literal::Float(x) => Value::Float(*x),
                Literal::Bool(b) => Value::Bool(*b),
                Literal::Str(s) => Value::Str(s.clone()),
            })),

            Expr::VariableAccess(access) => self
                .stack
                .variable(&access.name)
                .map(Evaluated::Ref)
                .ok_or_else(|| KiteError::SymbolNotFound {
                    position: access.position,
                    kind: "variable",
                    name: access.name.clone(),
                }),

            Expr::FuncCall(call) => match self.call_function(call)? {
                Some(value) => Ok(Evaluated::Value(value)),
                None => Err(KiteError::type_mismatch(
                    call.position,
                    "NON-VOID",
                    "VOID",
                )),
            },

            Expr::StructInit(init) => {
                let mut values = Vec::with_capacity(init.exprs.len());
                for expr in &init.exprs {
                    values.push(new_cell(self.eval_value(expr)?));
                }
                Ok(Evaluated::Value(Value::Struct(StructObj { values })))
            }

            Expr::Disjunction(e) => {
                // Both operands are evaluated; there is no short-circuit.
                let lhs = self.eval_bool(&e.lhs)?;
                let rhs = self.eval_bool(&e.rhs)?;
                Ok(Evaluated::Value(Value::Bool(lhs || rhs)))
            }
            Expr::Conjunction(e) => {
                let lhs = self.eval_bool(&e.lhs)?;
                let rhs = self.eval_bool(&e.rhs)?;
                Ok(Evaluated::Value(Value::Bool(lhs && rhs)))
            }

            Expr::Equal(e) => {
                let equal = self.eval_equality(e)?;
                Ok(Evaluated::Value(Value::Bool(equal)))
            }
            Expr::NotEqual(e) => {
                let equal = self.eval_equality(e)?;
                Ok(Evaluated::Value(Value::Bool(!equal)))
            }

            Expr::Less(e) => self.eval_relation(e, RelOp::Less),
            Expr::LessEqual(e) => self.eval_relation(e, RelOp::LessEqual),
            Expr::Greater(e) => self.eval_relation(e, RelOp::Greater),
            Expr::GreaterEqual(e) => self.eval_relation(e, RelOp::GreaterEqual),

            Expr::Addition(e) => self.eval_addition(e),
            Expr::Subtraction(e) => {
                self.eval_numeric(e, |l, r| l.wrapping_sub(r), |l, r| l - r)
            }
            Expr::Multiplication(e) => {
                self.eval_numeric(e, |l, r| l.wrapping_mul(r), |l, r| l * r)
            }
            Expr::Division(e) => self.eval_division(e),

            Expr::SignChange(e) => self.eval_sign_change(e),
            Expr::LogicalNegation(e) => {
                let value = self.eval_bool(&e.expr)?;
                Ok(Evaluated::Value(Value::Bool(!value)))
            }

            Expr::Conversion(e) => {
                let value = self.eval_value(&e.expr)?;
                let converted = self.convert(value, &e.spec, e.position)?;
                Ok(Evaluated::Value(converted))
            }
            Expr::TypeCheck(e) => {
                let result = self.eval_type_check(e)?;
                Ok(Evaluated::Value(Value::Bool(result)))
            }

            Expr::FieldAccess(e) => self.eval_field_access(e),
        }
    }

    /// Evaluates to a plain value, copying out of cells.
    pub(crate) fn eval_value(&mut self, expr: &'ast Expr) -> Result<Value<'ast>> {
        Ok(self.eval(expr)?.into_value())
    }

    /// Evaluates an expression required to be boolean.
    pub(crate) fn eval_bool(&mut self, expr: &'ast Expr) -> Result<bool> {
        match self.eval_value(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(KiteError::type_mismatch(
                expr.position(),
                BuiltInType::Bool,
                other.type_name(),
            )),
        }
    }

    /// `==` over same-typed scalars.
    fn eval_equality(&mut self, e: &'ast BinaryExpr) -> Result<bool> {
        let lhs = self.eval_value(&e.lhs)?;
        let rhs = self.eval_value(&e.rhs)?;

        match (&lhs, &rhs) {
            (Value::Bool(l), Value::Bool(r)) => Ok(l == r),
            (Value::Int(l), Value::Int(r)) => Ok(l == r),
            (Value::Float(l), Value::Float(r)) => Ok(l == r),
            (Value::Str(l), Value::Str(r)) => Ok(l == r),
            _ => Err(KiteError::type_mismatch(
                e.position,
                lhs.type_name(),
                rhs.type_name(),
            )),
        }
    }

    /// `< <= > >=` over ints, floats and strings (lexicographic).
    fn eval_relation(&mut self, e: &'ast BinaryExpr, op: RelOp) -> Result<Evaluated<'ast>> {
        let lhs = self.eval_value(&e.lhs)?;
        let rhs = self.eval_value(&e.rhs)?;

        let result = match (&lhs, &rhs) {
            (Value::Int(l), Value::Int(r)) => op.holds(l, r),
            (Value::Float(l), Value::Float(r)) => op.holds(l, r),
            (Value::Str(l), Value::Str(r)) => op.holds(l, r),
            _ => {
                return Err(KiteError::type_mismatch(
                    e.position,
                    lhs.type_name(),
                    rhs.type_name(),
                ))
            }
        };
        Ok(Evaluated::Value(Value::Bool(result)))
    }

    /// `+` over same-typed numbers, plus string concatenation.
    fn eval_addition(&mut self, e: &'ast BinaryExpr) -> Result<Evaluated<'ast>> {
        let lhs = self.eval_value(&e.lhs)?;
        let rhs = self.eval_value(&e.rhs)?;

        let result = match (lhs, rhs) {
            (Value::Str(l), Value::Str(r)) => Value::Str(l + &r),
            (Value::Int(l), Value::Int(r)) => Value::Int(l.wrapping_add(r)),
            (Value::Float(l), Value::Float(r)) => Value::Float(l + r),
            (lhs, rhs) => {
                return Err(KiteError::type_mismatch(
                    e.position,
                    lhs.type_name(),
                    rhs.type_name(),
                ))
            }
        };
        Ok(Evaluated::Value(result))
    }

    /// `-` and `*`: both operands must share a numeric type. Integer
    /// arithmetic wraps like the unsigned 32-bit values it runs on.
    fn eval_numeric(
        &mut self,
        e: &'ast BinaryExpr,
        int_op: fn(u32, u32) -> u32,
        float_op: fn(f32, f32) -> f32,
    ) -> Result<Evaluated<'ast>> {
        let lhs = self.eval_value(&e.lhs)?;
        let rhs = self.eval_value(&e.rhs)?;

        let result = match (&lhs, &rhs) {
            (Value::Int(l), Value::Int(r)) => Value::Int(int_op(*l, *r)),
            (Value::Float(l), Value::Float(r)) => Value::Float(float_op(*l, *r)),
            _ => {
                return Err(KiteError::type_mismatch(
                    e.position,
                    lhs.type_name(),
                    rhs.type_name(),
                ))
            }
        };
        Ok(Evaluated::Value(result))
    }

    fn eval_division(&mut self, e: &'ast BinaryExpr) -> Result<Evaluated<'ast>> {
        let lhs = self.eval_value(&e.lhs)?;
        let rhs = self.eval_value(&e.rhs)?;

        let result = match (&lhs, &rhs) {
            (Value::Int(l), Value::Int(r)) => {
                if *r == 0 {
                    return Err(KiteError::DivisionByZero { position: e.position });
                }
                Value::Int(l / r)
            }
            (Value::Float(l), Value::Float(r)) => {
                if *r == 0.0 {
                    return Err(KiteError::DivisionByZero { position: e.position });
                }
                Value::Float(l / r)
            }
            _ => {
                return Err(KiteError::type_mismatch(
                    e.position,
                    lhs.type_name(),
                    rhs.type_name(),
                ))
            }
        };
        Ok(Evaluated::Value(result))
    }

    /// Unary `-` on a number. Integer negation is the two's-complement
    /// negation of the unsigned value.
    fn eval_sign_change(&mut self, e: &'ast UnaryExpr) -> Result<Evaluated<'ast>> {
        let result = match self.eval_value(&e.expr)? {
            Value::Int(n) => Value::Int(n.wrapping_neg()),
            Value::Float(x) => Value::Float(-x),
            other => {
                return Err(KiteError::type_mismatch(
                    e.position,
                    BuiltInType::Int,
                    other.type_name(),
                ))
            }
        };
        Ok(Evaluated::Value(result))
    }

    /// `is`: a variant checks its payload's type, any other value checks
    /// its own.
    fn eval_type_check(&mut self, e: &'ast TypeExpr) -> Result<bool> {
        let value = self.eval_value(&e.expr)?;
        Ok(match &value {
            Value::Variant(obj) => obj.value.borrow().matches_spec(&e.spec),
            other => other.matches_spec(&e.spec),
        })
    }

    /// `expr.field` on a named struct. A reference operand yields a
    /// reference to the field cell (same constness); a temporary yields
    /// the field's value.
    fn eval_field_access(&mut self, e: &'ast FieldAccessExpr) -> Result<Evaluated<'ast>> {
        match self.eval(&e.expr)? {
            Evaluated::Ref(base) => {
                let cell = {
                    let value = base.cell.borrow();
                    self.named_struct_field(&value, &e.field, e.position)?
                };
                Ok(Evaluated::Ref(Reference {
                    cell,
                    is_const: base.is_const,
                }))
            }
            Evaluated::Value(value) => {
                let cell = self.named_struct_field(&value, &e.field, e.position)?;
                let field_value = cell.borrow().deep_clone();
                Ok(Evaluated::Value(field_value))
            }
        }
    }

    fn named_struct_field(
        &self,
        value: &Value<'ast>,
        field: &str,
        position: Position,
    ) -> Result<ValueCell<'ast>> {
        let Value::NamedStruct(obj) = value else {
            return Err(KiteError::type_mismatch(
                position,
                "named struct",
                value.type_name(),
            ));
        };
        obj.field(field).ok_or_else(|| KiteError::InvalidField {
            position,
            field: field.to_string(),
        })
    }

    /// `as`: scalar conversions, variant wrapping and unwrapping, and
    /// struct identity.
    pub(crate) fn convert(
        &mut self,
        value: Value<'ast>,
        spec: &TypeSpec,
        position: Position,
    ) -> Result<Value<'ast>> {
        match (value, spec) {
            // Unwrapping: a variant converts to exactly its payload type.
            (Value::Variant(obj), spec) => {
                let payload = obj.value.borrow();
                if payload.matches_spec(spec) {
                    Ok(payload.deep_clone())
                } else {
                    Err(KiteError::InvalidTypeConversion {
                        position,
                        from: payload.type_name(),
                        to: spec.to_string(),
                    })
                }
            }

            // Scalar-to-scalar conversions among int/float/bool: the
            // usual truncating / widening / nonzero-to-true rules.
            (Value::Int(n), TypeSpec::BuiltIn(to)) => match to {
                BuiltInType::Int => Ok(Value::Int(n)),
                BuiltInType::Float => Ok(Value::Float(n as f32)),
                BuiltInType::Bool => Ok(Value::Bool(n != 0)),
                BuiltInType::Str => Err(invalid_conversion(&Value::Int(n), spec, position)),
            },
            (Value::Float(x), TypeSpec::BuiltIn(to)) => match to {
                BuiltInType::Int => Ok(Value::Int(x as u32)),
                BuiltInType::Float => Ok(Value::Float(x)),
                BuiltInType::Bool => Ok(Value::Bool(x != 0.0)),
                BuiltInType::Str => Err(invalid_conversion(&Value::Float(x), spec, position)),
            },
            (Value::Bool(b), TypeSpec::BuiltIn(to)) => match to {
                BuiltInType::Int => Ok(Value::Int(b as u32)),
                BuiltInType::Float => Ok(Value::Float(b as u32 as f32)),
                BuiltInType::Bool => Ok(Value::Bool(b)),
                BuiltInType::Str => Err(invalid_conversion(&Value::Bool(b), spec, position)),
            },

            // Strings convert only to themselves.
            (Value::Str(s), TypeSpec::BuiltIn(BuiltInType::Str)) => Ok(Value::Str(s)),
            (value @ Value::Str(_), spec @ TypeSpec::BuiltIn(_)) => {
                Err(invalid_conversion(&value, spec, position))
            }

            // A named struct converts to its own name, or wraps into a
            // variant that lists it.
            (Value::NamedStruct(obj), TypeSpec::Named(to)) => {
                if obj.def.name == *to {
                    Ok(Value::NamedStruct(obj))
                } else {
                    self.wrap_in_variant(Value::NamedStruct(obj), to, position)
                }
            }

            // Scalars wrap into variants listing their type.
            (value @ (Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Str(_)),
                TypeSpec::Named(to)) => self.wrap_in_variant(value, to, position),

            (value, spec) => Err(invalid_conversion(&value, spec, position)),
        }
    }

    /// Produces a variant instance of `name` wrapping `value`, if the
    /// variant definition lists a matching type alternative.
    fn wrap_in_variant(
        &self,
        value: Value<'ast>,
        name: &str,
        position: Position,
    ) -> Result<Value<'ast>> {
        let Some(def) = self.stack.variant_def(name) else {
            return Err(KiteError::InvalidTypeConversion {
                position,
                from: value.type_name(),
                to: name.to_string(),
            });
        };

        if def.alternatives.iter().any(|alt| value.matches_spec(alt)) {
            Ok(Value::Variant(VariantObj {
                value: new_cell(value),
                def,
            }))
        } else {
            Err(KiteError::InvalidTypeConversion {
                position,
                from: value.type_name(),
                to: name.to_string(),
            })
        }
    }
}

fn invalid_conversion(value: &Value<'_>, spec: &TypeSpec, position: Position) -> KiteError {
    KiteError::InvalidTypeConversion {
        position,
        from: value.type_name(),
        to: spec.to_string(),
    }
}
