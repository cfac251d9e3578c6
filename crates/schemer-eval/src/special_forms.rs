//! Special-form dispatch and handlers. Keyword recognition
//! is by symbol identity against `schemer_util::symbol::keywords`, not by
//! lexical binding: this revision does not give special forms a run-time
//! representation a program could shadow, so `if`, `lambda`, and friends
//! are always syntactic no matter what's bound in the calling environment.

use schemer_heap::{EnvData, EnvHandle, Formals, ProcedureData, Result, SchemeError, Value};
use schemer_util::symbol::keywords;
use schemer_util::Symbol;

use crate::eval::{eval, Flow};

/// Returns `Some(flow)` if `head` names a special form, `None` if the
/// pair should instead be evaluated as a procedure application.
pub(crate) fn dispatch_special_form(head: Symbol, args: &Value, env: &EnvHandle) -> Result<Option<Flow>> {
    let flow = if head == keywords::quote() {
        eval_quote(args)?
    } else if head == keywords::if_() {
        eval_if(args, env)?
    } else if head == keywords::set_bang() {
        eval_set_bang(args, env)?
    } else if head == keywords::define() {
        eval_define(args, env)?
    } else if head == keywords::lambda() {
        eval_lambda(args, env)?
    } else if head == keywords::begin() {
        eval_body_sequence(&args.list_to_vec()?, env)?
    } else if head == keywords::cond() {
        eval_cond(args, env)?
    } else if head == keywords::case() {
        eval_case(args, env)?
    } else if head == keywords::and() {
        eval_and(args, env)?
    } else if head == keywords::or() {
        eval_or(args, env)?
    } else if head == keywords::let_() {
        eval_let(args, env)?
    } else if head == keywords::let_star() {
        eval_let_star(args, env)?
    } else if head == keywords::letrec() {
        eval_letrec(args, env)?
    } else if head == keywords::do_() {
        eval_do(args, env)?
    } else if head == keywords::delay() {
        eval_delay(args, env)?
    } else if head == keywords::define_syntax()
        || head == keywords::let_syntax()
        || head == keywords::letrec_syntax()
    {
        return Err(SchemeError::eval_error(
            "macros are not implemented: define-syntax/let-syntax/letrec-syntax",
        ));
    } else {
        return Ok(None);
    };
    Ok(Some(flow))
}

fn eval_quote(args: &Value) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let datum = items
        .into_iter()
        .next()
        .ok_or_else(|| SchemeError::eval_error("quote requires exactly one operand"))?;
    Ok(Flow::Done(datum))
}

fn eval_if(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    if items.len() < 2 || items.len() > 3 {
        return Err(SchemeError::arity_error("if requires 2 or 3 operands"));
    }
    let test = eval(&items[0], env)?;
    if test.is_true() {
        Ok(Flow::Tail(items[1].clone(), env.clone()))
    } else if let Some(alt) = items.get(2) {
        Ok(Flow::Tail(alt.clone(), env.clone()))
    } else {
        Ok(Flow::Done(Value::EmptyList))
    }
}

fn eval_set_bang(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let [name, expr] = items.as_slice() else {
        return Err(SchemeError::arity_error("set! requires exactly 2 operands"));
    };
    let sym = require_symbol(name)?;
    let value = eval(expr, env)?;
    env.assign(sym, value)?;
    Ok(Flow::Done(Value::EmptyList))
}

fn eval_define(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let target = items
        .first()
        .ok_or_else(|| SchemeError::arity_error("define requires at least a target"))?;
    match target {
        Value::Symbol(sym) => {
            let value = match items.get(1) {
                Some(expr) => eval(expr, env)?,
                None => Value::EmptyList,
            };
            if let Value::Procedure(proc) = &value {
                if let ProcedureData::Closure { name, .. } = proc.as_ref() {
                    if name.borrow().is_none() {
                        *name.borrow_mut() = Some(*sym);
                    }
                }
            }
            env.define(*sym, value)?;
            Ok(Flow::Done(Value::EmptyList))
        }
        Value::Pair(pair) => {
            // (define (f a …) body …) ≡ (define f (lambda (a …) body …)),
            // including the dotted-rest-formals shorthand (define (f a . rest) …).
            let name = require_symbol(&pair.car.borrow())?;
            let formals = parse_formals(&pair.cdr.borrow())?;
            let body = items[1..].to_vec();
            if body.is_empty() {
                return Err(SchemeError::eval_error("define requires a procedure body"));
            }
            let proc = ProcedureData::Closure {
                formals,
                body,
                env: env.clone(),
                name: std::cell::RefCell::new(Some(name)),
            };
            env.define(name, Value::Procedure(std::rc::Rc::new(proc)))?;
            Ok(Flow::Done(Value::EmptyList))
        }
        other => Err(SchemeError::type_error(format!(
            "define target must be a symbol or signature, got {}",
            other.kind_name()
        ))),
    }
}

fn eval_lambda(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (formals_datum, body) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("lambda requires formals and a body"))?;
    if body.is_empty() {
        return Err(SchemeError::eval_error("lambda requires at least one body form"));
    }
    let formals = parse_formals(formals_datum)?;
    let proc = ProcedureData::Closure {
        formals,
        body: body.to_vec(),
        env: env.clone(),
        name: std::cell::RefCell::new(None),
    };
    Ok(Flow::Done(Value::Procedure(std::rc::Rc::new(proc))))
}

/// `formals` is (i) a bare symbol, (ii) a proper list of symbols, or
/// (iii) a dotted list `(a b . rest)`.
fn parse_formals(formals: &Value) -> Result<Formals> {
    match formals {
        Value::Symbol(sym) => Ok(Formals::Variadic(*sym)),
        Value::EmptyList => Ok(Formals::Fixed(Vec::new())),
        Value::Pair(_) => {
            let tail = dotted_tail(formals)?;
            let list = formals.list_to_vec().or_else(|_| improper_signature(formals))?;
            parse_formals_from_list(&list, tail)
        }
        other => Err(SchemeError::type_error(format!(
            "invalid formals: {}",
            other.kind_name()
        ))),
    }
}

fn parse_formals_from_list(names: &[Value], tail: Option<Symbol>) -> Result<Formals> {
    let params = names.iter().map(require_symbol).collect::<Result<Vec<_>>>()?;
    match tail {
        Some(rest) => Ok(Formals::Rest(params, rest)),
        None => Ok(Formals::Fixed(params)),
    }
}

/// Walks a (possibly dotted) list of formals/signature datums, returning
/// the trailing `rest` symbol if the list ends in a dotted tail rather
/// than the empty list.
fn dotted_tail(list: &Value) -> Result<Option<Symbol>> {
    let mut cursor = list.clone();
    loop {
        match cursor {
            Value::EmptyList => return Ok(None),
            Value::Pair(pair) => {
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            Value::Symbol(sym) => return Ok(Some(sym)),
            other => {
                return Err(SchemeError::type_error(format!(
                    "invalid formals tail: {}",
                    other.kind_name()
                )))
            }
        }
    }
}

/// Collects the proper-list prefix of a dotted list (everything before
/// the final non-pair tail).
fn improper_signature(list: &Value) -> Result<Vec<Value>> {
    let mut out = Vec::new();
    let mut cursor = list.clone();
    loop {
        match cursor {
            Value::Pair(pair) => {
                out.push(pair.car.borrow().clone());
                let next = pair.cdr.borrow().clone();
                cursor = next;
            }
            _ => return Ok(out),
        }
    }
}

fn require_symbol(value: &Value) -> Result<Symbol> {
    match value {
        Value::Symbol(sym) => Ok(*sym),
        other => Err(SchemeError::type_error(format!(
            "expected a symbol, got {}",
            other.kind_name()
        ))),
    }
}

/// Shared by `begin` and a procedure body: evaluate everything but the
/// last form, then tail the last.
fn eval_body_sequence(forms: &[Value], env: &EnvHandle) -> Result<Flow> {
    match forms.split_last() {
        None => Ok(Flow::Done(Value::EmptyList)),
        Some((last, init)) => {
            for form in init {
                eval(form, env)?;
            }
            Ok(Flow::Tail(last.clone(), env.clone()))
        }
    }
}

fn eval_cond(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let clauses = args.list_to_vec()?;
    for (idx, clause) in clauses.iter().enumerate() {
        let parts = clause.list_to_vec()?;
        let (test, body) = parts
            .split_first()
            .ok_or_else(|| SchemeError::eval_error("cond clause must not be empty"))?;
        let is_else = matches!(test, Value::Symbol(s) if *s == keywords::else_());
        if is_else {
            if idx != clauses.len() - 1 {
                return Err(SchemeError::eval_error("cond's else clause must be last"));
            }
            return eval_body_sequence(body, env);
        }
        let test_value = eval(test, env)?;
        if test_value.is_true() {
            if body.is_empty() {
                return Ok(Flow::Done(test_value));
            }
            if body.len() == 2 {
                if let Value::Symbol(s) = &body[0] {
                    if *s == keywords::arrow() {
                        let proc = eval(&body[1], env)?;
                        return crate::apply::apply_tail(proc, vec![test_value]);
                    }
                }
            }
            return eval_body_sequence(body, env);
        }
    }
    Ok(Flow::Done(Value::EmptyList))
}

fn eval_case(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (key_expr, clauses) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("case requires a key expression"))?;
    let key = eval(key_expr, env)?;
    for (idx, clause) in clauses.iter().enumerate() {
        let parts = clause.list_to_vec()?;
        let (datums, body) = parts
            .split_first()
            .ok_or_else(|| SchemeError::eval_error("case clause must not be empty"))?;
        let is_else = matches!(datums, Value::Symbol(s) if *s == keywords::else_());
        if is_else {
            if idx != clauses.len() - 1 {
                return Err(SchemeError::eval_error("case's else clause must be last"));
            }
            return eval_body_sequence(body, env);
        }
        let candidates = datums.list_to_vec()?;
        if candidates.iter().any(|d| schemer_heap::equality::eqv(d, &key)) {
            return eval_body_sequence(body, env);
        }
    }
    Ok(Flow::Done(Value::EmptyList))
}

fn eval_and(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    match items.split_last() {
        None => Ok(Flow::Done(Value::Bool(true))),
        Some((last, init)) => {
            for item in init {
                let value = eval(item, env)?;
                if value.is_false() {
                    return Ok(Flow::Done(value));
                }
            }
            Ok(Flow::Tail(last.clone(), env.clone()))
        }
    }
}

fn eval_or(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    match items.split_last() {
        None => Ok(Flow::Done(Value::Bool(false))),
        Some((last, init)) => {
            for item in init {
                let value = eval(item, env)?;
                if value.is_true() {
                    return Ok(Flow::Done(value));
                }
            }
            Ok(Flow::Tail(last.clone(), env.clone()))
        }
    }
}

fn eval_let(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (bindings_datum, body) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("let requires a binding list and a body"))?;
    let bindings = bindings_datum.list_to_vec()?;
    let mut names = Vec::with_capacity(bindings.len());
    let mut values = Vec::with_capacity(bindings.len());
    for binding in &bindings {
        let parts = binding.list_to_vec()?;
        let [name, expr] = parts.as_slice() else {
            return Err(SchemeError::eval_error("let binding must be (name expr)"));
        };
        names.push(require_symbol(name)?);
        values.push(eval(expr, env)?);
    }
    let call_env = EnvData::extend(env, &names, &values);
    eval_body_sequence(body, &call_env)
}

fn eval_let_star(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (bindings_datum, body) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("let* requires a binding list and a body"))?;
    let bindings = bindings_datum.list_to_vec()?;
    let mut current = env.clone();
    for binding in &bindings {
        let parts = binding.list_to_vec()?;
        let [name, expr] = parts.as_slice() else {
            return Err(SchemeError::eval_error("let* binding must be (name expr)"));
        };
        let value = eval(expr, &current)?;
        let frame = EnvData::child(&current);
        frame.define(require_symbol(name)?, value)?;
        current = frame;
    }
    eval_body_sequence(body, &current)
}

fn eval_letrec(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (bindings_datum, body) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("letrec requires a binding list and a body"))?;
    let bindings = bindings_datum.list_to_vec()?;
    let frame = EnvData::child(env);
    let mut names = Vec::with_capacity(bindings.len());
    let mut exprs = Vec::with_capacity(bindings.len());
    for binding in &bindings {
        let parts = binding.list_to_vec()?;
        let [name, expr] = parts.as_slice() else {
            return Err(SchemeError::eval_error("letrec binding must be (name expr)"));
        };
        let sym = require_symbol(name)?;
        frame.define(sym, Value::EmptyList)?;
        names.push(sym);
        exprs.push(expr.clone());
    }
    for (name, expr) in names.iter().zip(exprs.iter()) {
        let value = eval(expr, &frame)?;
        frame.assign(*name, value)?;
    }
    eval_body_sequence(body, &frame)
}

fn eval_do(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let (specs_datum, rest) = items
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("do requires bindings, a test clause, and a body"))?;
    let (test_clause_datum, commands) = rest
        .split_first()
        .ok_or_else(|| SchemeError::arity_error("do requires a test clause"))?;

    struct DoVar {
        name: Symbol,
        step: Option<Value>,
    }

    let specs = specs_datum.list_to_vec()?;
    let mut vars = Vec::with_capacity(specs.len());
    let mut names = Vec::with_capacity(specs.len());
    let mut inits = Vec::with_capacity(specs.len());
    for spec in &specs {
        let parts = spec.list_to_vec()?;
        match parts.as_slice() {
            [name, init] => {
                let sym = require_symbol(name)?;
                names.push(sym);
                inits.push(eval(init, env)?);
                vars.push(DoVar { name: sym, step: None });
            }
            [name, init, step] => {
                let sym = require_symbol(name)?;
                names.push(sym);
                inits.push(eval(init, env)?);
                vars.push(DoVar { name: sym, step: Some(step.clone()) });
            }
            _ => return Err(SchemeError::eval_error("do binding must be (name init [step])")),
        }
    }
    let mut loop_env = EnvData::extend(env, &names, &inits);

    let test_clause = test_clause_datum.list_to_vec()?;
    let (test, result_forms) = test_clause
        .split_first()
        .ok_or_else(|| SchemeError::eval_error("do's test clause must not be empty"))?;

    loop {
        if eval(test, &loop_env)?.is_true() {
            return eval_body_sequence(result_forms, &loop_env);
        }
        for command in commands {
            eval(command, &loop_env)?;
        }
        let next_values = vars
            .iter()
            .map(|v| match &v.step {
                Some(step) => eval(step, &loop_env),
                None => loop_env.lookup(v.name),
            })
            .collect::<Result<Vec<_>>>()?;
        loop_env = EnvData::extend(env, &names, &next_values);
    }
}

fn eval_delay(args: &Value, env: &EnvHandle) -> Result<Flow> {
    let items = args.list_to_vec()?;
    let expr = items
        .into_iter()
        .next()
        .ok_or_else(|| SchemeError::arity_error("delay requires exactly one operand"))?;
    let promise = schemer_heap::PromiseData {
        thunk_expr: expr,
        thunk_env: env.clone(),
        forcing: std::cell::Cell::new(false),
        result: std::cell::RefCell::new(None),
    };
    Ok(Flow::Done(Value::Promise(std::rc::Rc::new(promise))))
}
