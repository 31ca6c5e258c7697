//! Starkway Vault - Custody of Bridged Assets
//!
//! The vault holds every bridged asset and is shared by all bridge versions.
//!
//! # Assets
//! An asset must be initialized once (`InitToken`, permissionless) before it
//! can be deposited or withdrawn. Initialization announces the asset's
//! metadata to L2 through the messaging oracle.
//!
//! # Connections
//! Only a `Connected` bridge version may move funds. Connecting is a
//! two-step, time-delayed process driven by the admin:
//! 1. `StartConnectionProcess` - the version becomes `ToBeConnected`
//! 2. `FinalizeConnectionProcess` - after the delay it becomes `Connected`
//!
//! `DisconnectStarkway` never removes the last connected version.

pub mod contract;
pub mod error;
mod execute;
pub mod metadata;
pub mod msg;
mod query;
pub mod state;

pub use crate::error::ContractError;
pub use crate::metadata::try_read_metadata;
