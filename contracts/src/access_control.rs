//! Access control for the SimVault contracts.
//!
//! - `Ownership`: a single owner fixed at deployment, used for admin entry points
//! - `VaultAuthority`: the set-once vault binding that gates mint/burn on
//!   SimStable and SimGov
//!
//! The vault binding is `Unset` until the token owner calls `set_vault`, and
//! can never be reassigned afterwards.

use odra::prelude::*;
use crate::errors::VaultError;
use crate::types::VaultBinding;

/// Single-owner access control
#[odra::module]
pub struct Ownership {
    owner: Var<Address>,
}

#[odra::module]
impl Ownership {
    pub fn init(&mut self, owner: Address) {
        self.owner.set(owner);
    }

    pub fn owner(&self) -> Option<Address> {
        self.owner.get()
    }

    pub fn is_owner(&self, account: Address) -> bool {
        self.owner.get() == Some(account)
    }

    /// Revert unless the caller is the owner
    pub fn require_owner(&self) {
        let caller = self.env().caller();
        if !self.is_owner(caller) {
            self.env().revert(VaultError::Unauthorized);
        }
    }
}

/// Set-once mint/burn authority
#[odra::module]
pub struct VaultAuthority {
    /// Bound vault; absent while unset
    vault: Var<Address>,
}

impl VaultAuthority {
    pub fn binding(&self) -> VaultBinding {
        VaultBinding::from(self.vault.get())
    }
}

#[odra::module]
impl VaultAuthority {
    pub fn vault(&self) -> Option<Address> {
        self.vault.get()
    }

    /// Bind the vault. Only the `Unset -> Set` transition is allowed.
    pub fn bind(&mut self, vault: Address) {
        match self.binding() {
            VaultBinding::Unset => self.vault.set(vault),
            VaultBinding::Set(_) => self.env().revert(VaultError::VaultAlreadySet),
        }
    }

    /// Revert unless the caller is the bound vault
    pub fn require_vault(&self) {
        let caller = self.env().caller();
        if !self.binding().is_vault(&caller) {
            self.env().revert(VaultError::OnlyVault);
        }
    }
}
