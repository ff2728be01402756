//! Interface contracts and the method-amnesty query.
//!
//! A method that is never called by name may still be live: if its
//! receiver type satisfies an interface observed anywhere in the analyzed
//! program, the method can be invoked through that interface. Contracts
//! are collected during construction and queried per method during
//! filtering.

use crate::model::{MethodSig, ProgramModel, TypeId};

/// The interface method sets observed across all analyzed packages
#[derive(Debug, Default)]
pub struct ContractSet {
    contracts: Vec<Vec<MethodSig>>,
}

impl ContractSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one interface shape's method set
    pub fn record(&mut self, methods: &[MethodSig]) {
        self.contracts.push(methods.to_vec());
    }

    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }

    /// Whether a method named `method_name` on `receiver` exists to fulfill
    /// some recorded contract.
    ///
    /// True iff a contract both declares a method of that name and is
    /// structurally satisfied by the receiver's method set: every contract
    /// method appears in the set with identical name and canonical
    /// signature.
    pub fn grants_amnesty(
        &self,
        model: &ProgramModel,
        receiver: TypeId,
        method_name: &str,
    ) -> bool {
        let method_set = model.method_set(receiver);
        self.contracts.iter().any(|contract| {
            contract.iter().any(|m| m.name == method_name)
                && contract.iter().all(|m| method_set.contains(m))
        })
    }
}
