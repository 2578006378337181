//! Tree-shaped intermediate representation of CIL method bodies.
//!
//! The IL tree is what decompiler passes rewrite and what the matchers in
//! [`crate::patterns`] inspect. Each [`IlInstruction`] owns its operand subtree;
//! variables, fields, blocks and containers are shared handles compared by
//! identity.
//!
//! # Architecture
//!
//! - [`instruction`] - The closed instruction set and its [`OpCode`] tags
//! - [`variable`] - Identity-compared variables and their kinds
//! - [`block`] - Branch and leave targets
//! - [`types`] - Metadata handles, type classification and operator tags
//! - [`function`] - The owner that allocates identities for one function
//!
//! # Usage
//!
//! ```rust
//! use cilmatch::il::{IlFunction, IlInstruction, IlType, ComparisonKind};
//!
//! let mut func = IlFunction::new();
//! let x = func.new_local(IlType::I32);
//!
//! // if (x != 0) 1 else 0
//! let cond = IlInstruction::compare(
//!     ComparisonKind::Inequality,
//!     IlInstruction::load_local(&x),
//!     IlInstruction::const_i4(0),
//! );
//! let inst = IlInstruction::if_else(cond, IlInstruction::const_i4(1), IlInstruction::const_i4(0));
//! assert!(inst.match_logic_and().is_some());
//! assert!(inst.match_logic_or().is_some());
//! ```

pub mod block;
pub mod function;
pub mod instruction;
pub mod types;
pub mod variable;

// Re-export primary types at module level
pub use block::{Block, BlockContainer, ContainerKind};
pub use function::IlFunction;
pub use instruction::{IlInstruction, OpCode};
pub use types::{
    BinaryNumericOperator, ComparisonKind, ConversionKind, FieldRef, IlType, MethodRef, Sign,
    StackType, TypeRef,
};
pub use variable::{IlVariable, IlVariableRc, VariableId, VariableKind};
