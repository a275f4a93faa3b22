//! `SymbolTable`: a stack of scopes mapping names to [`Ty`] (spec §2).

use std::collections::HashMap;

use super::types::Ty;

/// A stack of lexical scopes used by the checker to resolve local
/// variables, function parameters, and the reserved `return` key.
pub struct SymbolTable {
    scopes: Vec<HashMap<String, Ty>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        SymbolTable { scopes: Vec::new() }
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    pub fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// True if `name` is declared in the *innermost* scope only — used to
    /// reject same-scope shadowing (spec §4.3).
    pub fn declared_in_current_scope(&self, name: &str) -> bool {
        self.scopes.last().is_some_and(|scope| scope.contains_key(name))
    }

    /// Declares `name` in the innermost scope, overwriting any entry from
    /// an enclosing scope (legal shadowing across scopes).
    pub fn declare(&mut self, name: &str, ty: Ty) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), ty);
        }
    }

    /// Looks up `name` from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<&Ty> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
