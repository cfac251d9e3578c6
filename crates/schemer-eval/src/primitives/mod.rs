//! Wires the standard primitive library into a fresh top-level
//! environment. Each family module owns the Rust implementations for its
//! procedures; this module only binds names to them, one file per
//! concern.

mod booleans;
mod chars;
mod control;
mod equivalence;
mod numbers;
mod pairs;
mod reflection;
mod strings;
mod symbols;
mod vectors;

use schemer_heap::{EnvHandle, PrimitiveFn, ProcedureData, Value};
use schemer_util::Symbol;
use std::rc::Rc;

/// Installs every primitive procedure listed in the contract catalogue
/// into `env`, expected to be a fresh top-level environment.
pub fn install_primitives(env: &EnvHandle) {
    equivalence::install(env);
    booleans::install(env);
    pairs::install(env);
    symbols::install(env);
    numbers::install(env);
    chars::install(env);
    strings::install(env);
    vectors::install(env);
    control::install(env);
    reflection::install(env);
}

/// Binds `name` to a primitive procedure in `env`. Shared by every
/// family module's `install`.
pub(crate) fn bind(env: &EnvHandle, name: &'static str, func: PrimitiveFn) {
    env.define(
        Symbol::intern(name),
        Value::Procedure(Rc::new(ProcedureData::Primitive { name, func })),
    )
    .expect("defining into a fresh top-level environment never fails");
}

#[cfg(test)]
mod tests {
    use super::*;
    use schemer_heap::EnvData;

    #[test]
    fn install_primitives_binds_the_standard_library() {
        let env = EnvData::new_top_level();
        install_primitives(&env);
        assert!(env.is_bound(Symbol::intern("car")));
        assert!(env.is_bound(Symbol::intern("+")));
        assert!(env.is_bound(Symbol::intern("eqv?")));
        assert!(env.is_bound(Symbol::intern("force")));
    }
}
