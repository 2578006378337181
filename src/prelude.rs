//! # cilmatch Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! from the cilmatch library. Import it to build IL trees and run matchers
//! without naming each module.
//!
//! The matchers themselves are inherent methods on [`IlInstruction`] and need no
//! import.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all cilmatch operations
pub use crate::Error;

/// The result type used throughout cilmatch
pub use crate::Result;

/// Metadata token type backing field, method and type handles
pub use crate::token::Token;

// ================================================================================================
// IL Tree
// ================================================================================================

/// Instructions and their discriminator
pub use crate::il::{IlInstruction, OpCode};

/// Function-level owner of variables, blocks and containers
pub use crate::il::IlFunction;

/// Variables
pub use crate::il::{IlVariable, IlVariableRc, VariableId, VariableKind};

/// Branch and leave targets
pub use crate::il::{Block, BlockContainer, ContainerKind};

// ================================================================================================
// Types and Operator Tags
// ================================================================================================

/// Metadata handles
pub use crate::il::{FieldRef, MethodRef, TypeRef};

/// Type classification
pub use crate::il::{IlType, StackType};

/// Operator tags
pub use crate::il::{BinaryNumericOperator, ComparisonKind, ConversionKind, Sign};
