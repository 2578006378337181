//! Per-function ownership of variables and control-flow handles.
//!
//! An `IlFunction` is the arena every identity in an IL tree comes from: it hands
//! out [`VariableId`]s, [`Block`]s and [`BlockContainer`]s, and owns the table of
//! declared variables. Instructions only hold shared handles, so a tree can be
//! matched without access to the function that built it.
//!
//! # Structure
//!
//! ```text
//! IlFunction
//! ├── variables: Vec<IlVariableRc>  // indexed by VariableId
//! ├── body: BlockContainer          // ContainerKind::Function, id 0
//! ├── next_block: u32
//! └── next_container: u32
//! ```
//!
//! # Thread Safety
//!
//! `IlFunction` is `Send` and `Sync`; the variables it hands out are `Arc`-shared.

use std::sync::Arc;

use tracing::debug;

use crate::{
    il::{
        Block, BlockContainer, ContainerKind, IlType, IlVariable, IlVariableRc, VariableId,
        VariableKind,
    },
    Error, Result,
};

/// Owner of one function's variables and control-flow handles.
///
/// # Examples
///
/// ```rust
/// use cilmatch::il::{IlFunction, IlInstruction, IlType};
///
/// let mut func = IlFunction::new();
/// let this = func.declare_this(IlType::Object)?;
/// let tmp = func.new_local(IlType::I32);
///
/// let ret = IlInstruction::leave(func.body(), IlInstruction::load_local(&tmp));
/// assert!(ret.match_return().is_some());
/// assert!(IlInstruction::load_local(&this).is_load_this());
/// # Ok::<(), cilmatch::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IlFunction {
    variables: Vec<IlVariableRc>,
    body: BlockContainer,
    next_block: u32,
    next_container: u32,
    num_locals: i32,
    num_stack_slots: i32,
    num_exception_slots: i32,
}

impl Default for IlFunction {
    fn default() -> Self {
        Self::new()
    }
}

impl IlFunction {
    /// Creates an empty function with its body container.
    #[must_use]
    pub fn new() -> Self {
        Self {
            variables: Vec::new(),
            body: BlockContainer::new(0, ContainerKind::Function),
            next_block: 0,
            next_container: 1,
            num_locals: 0,
            num_stack_slots: 0,
            num_exception_slots: 0,
        }
    }

    /// Returns the container a `leave` targets to return from this function.
    #[must_use]
    pub const fn body(&self) -> BlockContainer {
        self.body
    }

    /// Allocates a new block handle.
    pub fn new_block(&mut self) -> Block {
        let block = Block::new(self.next_block);
        self.next_block += 1;
        block
    }

    /// Allocates a new container handle.
    ///
    /// A container of kind [`ContainerKind::Function`] models the body of a nested
    /// function (a lambda); leaving it is a return as well.
    pub fn new_container(&mut self, kind: ContainerKind) -> BlockContainer {
        let container = BlockContainer::new(self.next_container, kind);
        self.next_container += 1;
        container
    }

    fn push_variable(&mut self, kind: VariableKind, index: i32, ty: IlType) -> IlVariableRc {
        let id = VariableId::new(self.variables.len());
        let variable = Arc::new(IlVariable::new(id, kind, index, ty));
        self.variables.push(variable.clone());
        variable
    }

    fn next_local_index(&mut self) -> i32 {
        let index = self.num_locals;
        self.num_locals += 1;
        index
    }

    /// Declares the next local variable.
    pub fn new_local(&mut self, ty: IlType) -> IlVariableRc {
        let index = self.next_local_index();
        self.push_variable(VariableKind::Local, index, ty)
    }

    /// Declares the next local variable under a source-level name.
    pub fn new_named_local(&mut self, ty: IlType, name: impl Into<String>) -> IlVariableRc {
        let index = self.next_local_index();
        let id = VariableId::new(self.variables.len());
        let variable =
            Arc::new(IlVariable::new(id, VariableKind::Local, index, ty).with_name(name));
        self.variables.push(variable.clone());
        variable
    }

    /// Declares the next local variable as `pinned`.
    ///
    /// Pinned locals share the index space of ordinary locals.
    pub fn new_pinned_local(&mut self, ty: IlType) -> IlVariableRc {
        let index = self.next_local_index();
        self.push_variable(VariableKind::PinnedLocal, index, ty)
    }

    /// Declares the next evaluation stack slot.
    pub fn new_stack_slot(&mut self, ty: IlType) -> IlVariableRc {
        let index = self.num_stack_slots;
        self.num_stack_slots += 1;
        self.push_variable(VariableKind::StackSlot, index, ty)
    }

    /// Declares the variable a catch handler binds its exception object to.
    ///
    /// Exception variables are numbered per handler, independently of stack slots.
    pub fn new_exception_variable(&mut self, ty: IlType) -> IlVariableRc {
        let index = self.num_exception_slots;
        self.num_exception_slots += 1;
        self.push_variable(VariableKind::ExceptionStackSlot, index, ty)
    }

    fn has_parameter(&self, index: i32) -> bool {
        self.variables
            .iter()
            .any(|v| v.kind() == VariableKind::Parameter && v.index() == index)
    }

    /// Declares the implicit receiver of an instance method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateParameter`] if the receiver was already declared.
    pub fn declare_this(&mut self, ty: IlType) -> Result<IlVariableRc> {
        self.declare_parameter_at(IlVariable::THIS_INDEX, ty)
    }

    /// Declares the parameter at position `index` of the signature.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateParameter`] if a parameter with this index exists.
    pub fn declare_parameter(&mut self, index: u16, ty: IlType) -> Result<IlVariableRc> {
        self.declare_parameter_at(i32::from(index), ty)
    }

    fn declare_parameter_at(&mut self, index: i32, ty: IlType) -> Result<IlVariableRc> {
        if self.has_parameter(index) {
            return Err(Error::DuplicateParameter(index));
        }
        debug!(index, %ty, "declaring parameter");
        Ok(self.push_variable(VariableKind::Parameter, index, ty))
    }

    /// Looks up a variable by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::VariableNotFound`] if the id was not allocated by this function.
    pub fn variable(&self, id: VariableId) -> Result<&IlVariableRc> {
        self.variables
            .get(id.index())
            .ok_or(Error::VariableNotFound(id))
    }

    /// Returns all declared variables, in declaration order.
    #[must_use]
    pub fn variables(&self) -> &[IlVariableRc] {
        &self.variables
    }

    /// Returns the declared parameters, including the receiver.
    pub fn parameters(&self) -> impl Iterator<Item = &IlVariableRc> {
        self.variables
            .iter()
            .filter(|v| v.kind() == VariableKind::Parameter)
    }
}
