//! Structural matchers over [`IlInstruction`](crate::il::IlInstruction) trees.
//!
//! Every matcher is an inherent `&self` method on `IlInstruction`, so a rewrite pass
//! reads as a chain of shape tests:
//!
//! ```rust
//! use cilmatch::il::{IlFunction, IlInstruction, IlType, FieldRef};
//! use cilmatch::token::Token;
//!
//! let mut func = IlFunction::new();
//! let tmp = func.new_stack_slot(IlType::I32);
//! let field = FieldRef::new(Token::new(0x0400_0001));
//!
//! // stloc S_0(ldobj(ldsflda field))
//! let inst = IlInstruction::store_local(
//!     &tmp,
//!     IlInstruction::load_indirect(IlInstruction::load_static_field_addr(field), IlType::I32),
//! );
//!
//! let value = inst.match_store_local_to(&tmp).expect("stores to tmp");
//! assert_eq!(value.match_static_field_load(), Some(field));
//! ```
//!
//! # Calling Convention
//!
//! - `is_*` methods answer a yes/no question and may take an expected operand
//!   (`is_const_i4(0)`, `is_load_local(&v)`)
//! - `match_*` methods return `Some` with the captured parts on success and `None`
//!   otherwise; a failed match yields nothing, never a partial capture
//! - Captured subtrees are borrowed from the matched instruction
//! - No matcher mutates the tree, allocates or fails; matchers are safe to call
//!   from any number of threads on a shared tree
//!
//! # Families
//!
//! - [`literals`] - Constants and `nop`
//! - [`locals`] - Variable loads, stores and address-of, array length
//! - [`control`] - Branches, leaves, returns, `if` and catch handler entry
//! - [`logic`] - Short-circuit `&&` / `||`, negation, equality in both encodings
//! - [`fields`] - Field loads and stores through `ldobj` / `stobj`
//! - [`numeric`] - Binary arithmetic and bitwise operators
//! - [`conversion`] - Peeling unchecked conversions

pub mod control;
pub mod conversion;
pub mod fields;
pub mod literals;
pub mod locals;
pub mod logic;
pub mod numeric;
