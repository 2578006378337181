// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # cilmatch
//!
//! Structural pattern matching over tree-shaped CIL intermediate code.
//!
//! A decompiler lifts CIL bytecode into a tree where every instruction owns its
//! operands. Its rewrite passes then look for small idioms in that tree: a
//! short-circuit `&&` hidden in an `if`, a field load spelled as an indirect load
//! through a field address, an equality encoded as a negated inequality. `cilmatch`
//! provides the tree ([`il`]) and a library of side-effect-free matchers
//! ([`patterns`]) that recognize those idioms and hand back the interesting parts.
//!
//! ## Features
//!
//! - **Closed instruction set** - [`il::IlInstruction`] is a sum type; every matcher is total over it
//! - **Identity handles** - Variables, fields, blocks and containers compare by identity, not structure
//! - **No partial captures** - A matcher returns `Option<captures>`, so a failed match yields nothing
//! - **Canonical forms** - Field accesses and equality are recognized in every encoding the tree uses
//!
//! ## Quick Start
//!
//! ```rust
//! use cilmatch::prelude::*;
//!
//! let mut func = IlFunction::new();
//! let a = func.new_local(IlType::Bool);
//! let b = func.new_local(IlType::Bool);
//!
//! // a && b
//! let inst = IlInstruction::if_else(
//!     IlInstruction::load_local(&a),
//!     IlInstruction::load_local(&b),
//!     IlInstruction::const_i4(0),
//! );
//!
//! let (lhs, rhs) = inst.match_logic_and().expect("short-circuit and");
//! assert!(lhs.is_load_local(&a));
//! assert!(rhs.is_load_local(&b));
//! ```
//!
//! ## Architecture
//!
//! - [`token`] - Metadata tokens backing field, method and type handles
//! - [`il`] - The IL tree, its handles and the [`il::IlFunction`] that allocates them
//! - [`patterns`] - The matchers, grouped by instruction family
//!
//! ## Error Handling
//!
//! Matchers never fail. Fallible operations are limited to building the tree
//! (validating a field token, declaring parameters, looking up a variable) and
//! return [`Result`].
//!
//! ## Logging
//!
//! The crate emits [`tracing`] events (`debug` for variable declarations, `trace`
//! inside matchers that see through nested shapes). Install any `tracing`
//! subscriber to observe them; without one they cost nothing.

mod error;

/// Convenient re-exports of the most commonly used types.
///
/// # Example
///
/// ```rust
/// use cilmatch::prelude::*;
///
/// let mut func = IlFunction::new();
/// let this = func.declare_this(IlType::Object)?;
/// assert!(IlInstruction::load_local(&this).is_load_this());
/// # Ok::<(), cilmatch::Error>(())
/// ```
pub mod prelude;

/// Metadata tokens.
///
/// Field, method and type handles in the IL tree wrap a [`token::Token`]; two
/// handles name the same entity iff their tokens are equal.
pub mod token;

/// The tree-shaped IL that matchers inspect.
///
/// # Key Types
///
/// - [`il::IlInstruction`] - One instruction with its operand subtree
/// - [`il::IlVariable`] - A local, parameter, stack slot or exception variable
/// - [`il::IlFunction`] - Allocates variables, blocks and containers for one function
/// - [`il::BlockContainer`] - Target of `leave`; the function body container makes it a return
pub mod il;

/// Structural matchers, implemented as methods on [`il::IlInstruction`].
pub mod patterns;

/// `cilmatch` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
///
/// # Examples
///
/// ```rust
/// use cilmatch::{il::FieldRef, token::Token, Result};
///
/// fn field(raw: u32) -> Result<FieldRef> {
///     FieldRef::from_token(Token::new(raw))
/// }
///
/// assert!(field(0x0400_0001).is_ok());
/// assert!(field(0x0200_0001).is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `cilmatch` Error type
///
/// The error type for every fallible operation in this crate. Matchers don't use it.
pub use error::Error;
