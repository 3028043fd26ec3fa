//! Chainable scoped name maps.

use std::collections::HashMap;

use super::error::SemanticError;

/// A stack of name-to-value scopes.
///
/// `lookup` searches from the innermost scope outward. `declare` rejects a
/// name that is already visible *anywhere* in the chain, not just in the
/// current scope. `clear` empties only the innermost scope; entries in
/// enclosing scopes survive.
pub struct ScopeChain<T> {
    scopes: Vec<HashMap<String, T>>,
}

impl<T> ScopeChain<T> {
    /// Creates a chain with a single root scope.
    pub fn new() -> Self {
        ScopeChain {
            scopes: vec![HashMap::new()],
        }
    }

    /// Pushes a child scope.
    pub fn enter(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Pops the innermost scope, discarding its entries.
    pub fn exit(&mut self) {
        debug_assert!(self.scopes.len() > 1, "exit() without matching enter()");
        self.scopes.pop();
    }

    /// Declares a name in the innermost scope.
    ///
    /// # Errors
    ///
    /// Fails with "`name` already declared" if the name is visible anywhere
    /// in the chain.
    pub fn declare(&mut self, name: &str, value: T) -> Result<(), SemanticError> {
        if self.lookup(name).is_some() {
            return Err(SemanticError::already_declared(name));
        }
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), value);
        }
        Ok(())
    }

    /// Looks a name up, searching from the innermost scope outward.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name))
    }

    /// Empties only the innermost scope.
    pub fn clear(&mut self) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.clear();
        }
    }
}

impl<T> Default for ScopeChain<T> {
    fn default() -> Self {
        Self::new()
    }
}
