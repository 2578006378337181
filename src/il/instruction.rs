//! Tree-shaped IL instructions.
//!
//! This module defines [`IlInstruction`], the closed set of instruction shapes the
//! matchers in [`crate::patterns`] recognize. Unlike a flat instruction stream,
//! every instruction owns its operands as child instructions, so an expression like
//! `a.f + 1` is a single `binary.add(ldobj(ldflda f(ldloc a)), ldc.i4 1)` tree.
//!
//! # Operation Categories
//!
//! - **Constants**: `ldc.i4`, `ldc.i8`, `ldc.f8`, `ldnull`, `ldstr`
//! - **Locals**: `ldloc`, `ldloca`, `stloc`
//! - **Control flow**: `br`, `leave`, `if`, `try.catch.handler`, `throw`
//! - **Logic**: `logic.not`, `comp`
//! - **Memory**: `ldobj`, `stobj`, `ldflda`, `ldsflda`, `ldelema`, `ldlen`
//! - **Arithmetic**: `binary`, `conv`
//! - **Calls**: `call`
//!
//! # Field Naming
//!
//! - `left`, `right`: binary operands
//! - `argument`: unary operand
//! - `target`: the address (or object) an access goes through
//! - `value`: a value being stored, returned or passed out of a container
//! - `condition`, `true_inst`, `false_inst`: the arms of an `if`
//!
//! An `if` without an else arm, a `leave` without a value and an empty handler
//! filter all hold [`IlInstruction::Nop`] in place of the missing child.

#![allow(missing_docs)]

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::il::{
    BinaryNumericOperator, Block, BlockContainer, ComparisonKind, ConversionKind, FieldRef,
    IlType, IlVariableRc, MethodRef, Sign, StackType,
};

/// Discriminator of an [`IlInstruction`], one per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, strum::Display)]
pub enum OpCode {
    /// [`IlInstruction::Nop`]
    #[strum(serialize = "nop")]
    Nop,
    /// [`IlInstruction::ConstI4`]
    #[strum(serialize = "ldc.i4")]
    ConstI4,
    /// [`IlInstruction::ConstI8`]
    #[strum(serialize = "ldc.i8")]
    ConstI8,
    /// [`IlInstruction::ConstF8`]
    #[strum(serialize = "ldc.f8")]
    ConstF8,
    /// [`IlInstruction::ConstNull`]
    #[strum(serialize = "ldnull")]
    ConstNull,
    /// [`IlInstruction::ConstString`]
    #[strum(serialize = "ldstr")]
    ConstString,
    /// [`IlInstruction::LoadLocal`]
    #[strum(serialize = "ldloc")]
    LoadLocal,
    /// [`IlInstruction::LoadLocalAddr`]
    #[strum(serialize = "ldloca")]
    LoadLocalAddr,
    /// [`IlInstruction::StoreLocal`]
    #[strum(serialize = "stloc")]
    StoreLocal,
    /// [`IlInstruction::ArrayLength`]
    #[strum(serialize = "ldlen")]
    ArrayLength,
    /// [`IlInstruction::Leave`]
    #[strum(serialize = "leave")]
    Leave,
    /// [`IlInstruction::Branch`]
    #[strum(serialize = "br")]
    Branch,
    /// [`IlInstruction::If`]
    #[strum(serialize = "if")]
    If,
    /// [`IlInstruction::LogicNot`]
    #[strum(serialize = "logic.not")]
    LogicNot,
    /// [`IlInstruction::Compare`]
    #[strum(serialize = "comp")]
    Compare,
    /// [`IlInstruction::CatchHandler`]
    #[strum(serialize = "try.catch.handler")]
    CatchHandler,
    /// [`IlInstruction::LoadIndirect`]
    #[strum(serialize = "ldobj")]
    LoadIndirect,
    /// [`IlInstruction::StoreIndirect`]
    #[strum(serialize = "stobj")]
    StoreIndirect,
    /// [`IlInstruction::LoadFieldAddr`]
    #[strum(serialize = "ldflda")]
    LoadFieldAddr,
    /// [`IlInstruction::LoadStaticFieldAddr`]
    #[strum(serialize = "ldsflda")]
    LoadStaticFieldAddr,
    /// [`IlInstruction::LoadElementAddr`]
    #[strum(serialize = "ldelema")]
    LoadElementAddr,
    /// [`IlInstruction::BinaryNumeric`]
    #[strum(serialize = "binary")]
    BinaryNumeric,
    /// [`IlInstruction::Conv`]
    #[strum(serialize = "conv")]
    Conv,
    /// [`IlInstruction::Call`]
    #[strum(serialize = "call")]
    Call,
    /// [`IlInstruction::Throw`]
    #[strum(serialize = "throw")]
    Throw,
}

/// An IL instruction together with the subtree of its operands.
///
/// Instructions are immutable once built; the matchers only borrow them.
#[derive(Debug, Clone, PartialEq)]
pub enum IlInstruction {
    /// No operation; also the placeholder for an absent child.
    Nop,

    /// 32-bit integer constant.
    ConstI4 { value: i32 },

    /// 64-bit integer constant.
    ConstI8 { value: i64 },

    /// 64-bit floating point constant.
    ConstF8 { value: f64 },

    /// The null reference.
    ConstNull,

    /// String literal.
    ConstString { value: String },

    /// Read the value of a variable.
    LoadLocal { variable: IlVariableRc },

    /// Take the address of a variable.
    LoadLocalAddr { variable: IlVariableRc },

    /// Assign a value to a variable.
    StoreLocal {
        variable: IlVariableRc,
        value: Box<IlInstruction>,
    },

    /// Length of a single-dimensional array, produced as `result_type`.
    ArrayLength {
        result_type: StackType,
        array: Box<IlInstruction>,
    },

    /// Exit `target`, passing `value` out of it.
    ///
    /// Leaving a function body container is a return.
    Leave {
        target: BlockContainer,
        value: Box<IlInstruction>,
    },

    /// Unconditional jump to a block.
    Branch { target: Block },

    /// Two-armed conditional; usable both as statement and as expression.
    If {
        condition: Box<IlInstruction>,
        true_inst: Box<IlInstruction>,
        false_inst: Box<IlInstruction>,
    },

    /// Boolean negation.
    LogicNot { argument: Box<IlInstruction> },

    /// Comparison producing 0 or 1.
    Compare {
        kind: ComparisonKind,
        sign: Sign,
        left: Box<IlInstruction>,
        right: Box<IlInstruction>,
    },

    /// Entry of a catch handler: binds the caught exception to `variable`.
    CatchHandler {
        variable: IlVariableRc,
        filter: Box<IlInstruction>,
        body: Box<IlInstruction>,
    },

    /// Read a value of type `ty` through the address `target`.
    LoadIndirect {
        target: Box<IlInstruction>,
        ty: IlType,
    },

    /// Write `value` of type `ty` through the address `target`.
    StoreIndirect {
        target: Box<IlInstruction>,
        value: Box<IlInstruction>,
        ty: IlType,
    },

    /// Address of an instance field of the object `target`.
    LoadFieldAddr {
        target: Box<IlInstruction>,
        field: FieldRef,
    },

    /// Address of a static field.
    LoadStaticFieldAddr { field: FieldRef },

    /// Address of an array element.
    LoadElementAddr {
        array: Box<IlInstruction>,
        indices: Vec<IlInstruction>,
        element_type: IlType,
    },

    /// Binary arithmetic or bitwise operation.
    BinaryNumeric {
        operator: BinaryNumericOperator,
        left: Box<IlInstruction>,
        right: Box<IlInstruction>,
        check_overflow: bool,
        sign: Sign,
    },

    /// Numeric or pointer conversion to `target_type`.
    Conv {
        argument: Box<IlInstruction>,
        kind: ConversionKind,
        target_type: StackType,
        check_overflow: bool,
    },

    /// Method call.
    Call {
        method: MethodRef,
        args: Vec<IlInstruction>,
    },

    /// Throw the exception object `argument`.
    Throw { argument: Box<IlInstruction> },
}

impl IlInstruction {
    /// `ldc.i4 value`
    #[must_use]
    pub const fn const_i4(value: i32) -> Self {
        Self::ConstI4 { value }
    }

    /// `ldc.i8 value`
    #[must_use]
    pub const fn const_i8(value: i64) -> Self {
        Self::ConstI8 { value }
    }

    /// `ldstr value`
    #[must_use]
    pub fn const_string(value: impl Into<String>) -> Self {
        Self::ConstString {
            value: value.into(),
        }
    }

    /// `ldloc variable`
    #[must_use]
    pub fn load_local(variable: &IlVariableRc) -> Self {
        Self::LoadLocal {
            variable: variable.clone(),
        }
    }

    /// `ldloca variable`
    #[must_use]
    pub fn load_local_addr(variable: &IlVariableRc) -> Self {
        Self::LoadLocalAddr {
            variable: variable.clone(),
        }
    }

    /// `stloc variable(value)`
    #[must_use]
    pub fn store_local(variable: &IlVariableRc, value: IlInstruction) -> Self {
        Self::StoreLocal {
            variable: variable.clone(),
            value: Box::new(value),
        }
    }

    /// `ldlen.result_type(array)`
    #[must_use]
    pub fn array_length(result_type: StackType, array: IlInstruction) -> Self {
        Self::ArrayLength {
            result_type,
            array: Box::new(array),
        }
    }

    /// `leave target(value)`
    #[must_use]
    pub fn leave(target: BlockContainer, value: IlInstruction) -> Self {
        Self::Leave {
            target,
            value: Box::new(value),
        }
    }

    /// `leave target` without a value.
    #[must_use]
    pub fn leave_void(target: BlockContainer) -> Self {
        Self::leave(target, Self::Nop)
    }

    /// `br target`
    #[must_use]
    pub const fn branch(target: Block) -> Self {
        Self::Branch { target }
    }

    /// `if (condition) true_inst else false_inst`
    #[must_use]
    pub fn if_else(
        condition: IlInstruction,
        true_inst: IlInstruction,
        false_inst: IlInstruction,
    ) -> Self {
        Self::If {
            condition: Box::new(condition),
            true_inst: Box::new(true_inst),
            false_inst: Box::new(false_inst),
        }
    }

    /// `if (condition) true_inst`, with a `nop` else arm.
    #[must_use]
    pub fn if_then(condition: IlInstruction, true_inst: IlInstruction) -> Self {
        Self::if_else(condition, true_inst, Self::Nop)
    }

    /// `logic.not(argument)`
    #[must_use]
    pub fn logic_not(argument: IlInstruction) -> Self {
        Self::LogicNot {
            argument: Box::new(argument),
        }
    }

    /// `comp(left kind right)`
    #[must_use]
    pub fn compare(kind: ComparisonKind, left: IlInstruction, right: IlInstruction) -> Self {
        Self::Compare {
            kind,
            sign: Sign::None,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Catch handler binding `variable`, without a filter.
    #[must_use]
    pub fn catch_handler(variable: &IlVariableRc, body: IlInstruction) -> Self {
        Self::CatchHandler {
            variable: variable.clone(),
            filter: Box::new(Self::Nop),
            body: Box::new(body),
        }
    }

    /// `ldobj ty(target)`
    #[must_use]
    pub fn load_indirect(target: IlInstruction, ty: IlType) -> Self {
        Self::LoadIndirect {
            target: Box::new(target),
            ty,
        }
    }

    /// `stobj ty(target, value)`
    #[must_use]
    pub fn store_indirect(target: IlInstruction, value: IlInstruction, ty: IlType) -> Self {
        Self::StoreIndirect {
            target: Box::new(target),
            value: Box::new(value),
            ty,
        }
    }

    /// `ldflda field(target)`
    #[must_use]
    pub fn load_field_addr(target: IlInstruction, field: FieldRef) -> Self {
        Self::LoadFieldAddr {
            target: Box::new(target),
            field,
        }
    }

    /// `ldsflda field`
    #[must_use]
    pub const fn load_static_field_addr(field: FieldRef) -> Self {
        Self::LoadStaticFieldAddr { field }
    }

    /// `ldelema element_type(array, indices...)`
    #[must_use]
    pub fn load_element_addr(
        array: IlInstruction,
        indices: Vec<IlInstruction>,
        element_type: IlType,
    ) -> Self {
        Self::LoadElementAddr {
            array: Box::new(array),
            indices,
            element_type,
        }
    }

    /// Unchecked, sign-agnostic `binary.operator(left, right)`.
    #[must_use]
    pub fn binary(
        operator: BinaryNumericOperator,
        left: IlInstruction,
        right: IlInstruction,
    ) -> Self {
        Self::BinaryNumeric {
            operator,
            left: Box::new(left),
            right: Box::new(right),
            check_overflow: false,
            sign: Sign::None,
        }
    }

    /// Unchecked `conv.kind.target_type(argument)`.
    #[must_use]
    pub fn conv(argument: IlInstruction, kind: ConversionKind, target_type: StackType) -> Self {
        Self::Conv {
            argument: Box::new(argument),
            kind,
            target_type,
            check_overflow: false,
        }
    }

    /// Returns the discriminator of this instruction.
    #[must_use]
    pub const fn opcode(&self) -> OpCode {
        match self {
            Self::Nop => OpCode::Nop,
            Self::ConstI4 { .. } => OpCode::ConstI4,
            Self::ConstI8 { .. } => OpCode::ConstI8,
            Self::ConstF8 { .. } => OpCode::ConstF8,
            Self::ConstNull => OpCode::ConstNull,
            Self::ConstString { .. } => OpCode::ConstString,
            Self::LoadLocal { .. } => OpCode::LoadLocal,
            Self::LoadLocalAddr { .. } => OpCode::LoadLocalAddr,
            Self::StoreLocal { .. } => OpCode::StoreLocal,
            Self::ArrayLength { .. } => OpCode::ArrayLength,
            Self::Leave { .. } => OpCode::Leave,
            Self::Branch { .. } => OpCode::Branch,
            Self::If { .. } => OpCode::If,
            Self::LogicNot { .. } => OpCode::LogicNot,
            Self::Compare { .. } => OpCode::Compare,
            Self::CatchHandler { .. } => OpCode::CatchHandler,
            Self::LoadIndirect { .. } => OpCode::LoadIndirect,
            Self::StoreIndirect { .. } => OpCode::StoreIndirect,
            Self::LoadFieldAddr { .. } => OpCode::LoadFieldAddr,
            Self::LoadStaticFieldAddr { .. } => OpCode::LoadStaticFieldAddr,
            Self::LoadElementAddr { .. } => OpCode::LoadElementAddr,
            Self::BinaryNumeric { .. } => OpCode::BinaryNumeric,
            Self::Conv { .. } => OpCode::Conv,
            Self::Call { .. } => OpCode::Call,
            Self::Throw { .. } => OpCode::Throw,
        }
    }

    /// Returns the direct children of this instruction, in evaluation order.
    #[must_use]
    pub fn children(&self) -> Vec<&IlInstruction> {
        match self {
            Self::Nop
            | Self::ConstI4 { .. }
            | Self::ConstI8 { .. }
            | Self::ConstF8 { .. }
            | Self::ConstNull
            | Self::ConstString { .. }
            | Self::LoadLocal { .. }
            | Self::LoadLocalAddr { .. }
            | Self::Branch { .. }
            | Self::LoadStaticFieldAddr { .. } => vec![],

            Self::StoreLocal { value, .. } | Self::Leave { value, .. } => vec![value.as_ref()],
            Self::ArrayLength { array, .. } => vec![array.as_ref()],
            Self::LogicNot { argument }
            | Self::Conv { argument, .. }
            | Self::Throw { argument } => vec![argument.as_ref()],
            Self::LoadIndirect { target, .. } | Self::LoadFieldAddr { target, .. } => {
                vec![target.as_ref()]
            }

            Self::If {
                condition,
                true_inst,
                false_inst,
            } => vec![condition.as_ref(), true_inst.as_ref(), false_inst.as_ref()],
            Self::Compare { left, right, .. } | Self::BinaryNumeric { left, right, .. } => {
                vec![left.as_ref(), right.as_ref()]
            }
            Self::CatchHandler { filter, body, .. } => vec![filter.as_ref(), body.as_ref()],
            Self::StoreIndirect { target, value, .. } => vec![target.as_ref(), value.as_ref()],

            Self::LoadElementAddr { array, indices, .. } => {
                let mut children = vec![array.as_ref()];
                children.extend(indices);
                children
            }
            Self::Call { args, .. } => args.iter().collect(),
        }
    }

    /// Returns `true` for a `leave` whose target is a function body.
    #[must_use]
    pub const fn is_leaving_function(&self) -> bool {
        matches!(self, Self::Leave { target, .. } if target.is_function_body())
    }
}

fn write_args(f: &mut fmt::Formatter<'_>, args: &[IlInstruction]) -> fmt::Result {
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    Ok(())
}

impl fmt::Display for IlInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nop => write!(f, "nop"),
            Self::ConstI4 { value } => write!(f, "ldc.i4 {value}"),
            Self::ConstI8 { value } => write!(f, "ldc.i8 {value}"),
            Self::ConstF8 { value } => write!(f, "ldc.f8 {value}"),
            Self::ConstNull => write!(f, "ldnull"),
            Self::ConstString { value } => write!(f, "ldstr {value:?}"),
            Self::LoadLocal { variable } => write!(f, "ldloc {variable}"),
            Self::LoadLocalAddr { variable } => write!(f, "ldloca {variable}"),
            Self::StoreLocal { variable, value } => write!(f, "stloc {variable}({value})"),
            Self::ArrayLength { result_type, array } => write!(f, "ldlen.{result_type}({array})"),
            Self::Leave { target, value } => {
                if matches!(value.as_ref(), Self::Nop) {
                    write!(f, "leave {target}")
                } else {
                    write!(f, "leave {target} ({value})")
                }
            }
            Self::Branch { target } => write!(f, "br {target}"),
            Self::If {
                condition,
                true_inst,
                false_inst,
            } => {
                write!(f, "if ({condition}) {true_inst}")?;
                if !matches!(false_inst.as_ref(), Self::Nop) {
                    write!(f, " else {false_inst}")?;
                }
                Ok(())
            }
            Self::LogicNot { argument } => write!(f, "logic.not({argument})"),
            Self::Compare {
                kind, left, right, ..
            } => write!(f, "comp({left} {kind} {right})"),
            Self::CatchHandler {
                variable,
                filter,
                body,
            } => {
                write!(f, "catch {variable}")?;
                if !matches!(filter.as_ref(), Self::Nop) {
                    write!(f, " when ({filter})")?;
                }
                write!(f, " {body}")
            }
            Self::LoadIndirect { target, ty } => write!(f, "ldobj {ty}({target})"),
            Self::StoreIndirect { target, value, ty } => write!(f, "stobj {ty}({target}, {value})"),
            Self::LoadFieldAddr { target, field } => write!(f, "ldflda {field}({target})"),
            Self::LoadStaticFieldAddr { field } => write!(f, "ldsflda {field}"),
            Self::LoadElementAddr {
                array,
                indices,
                element_type,
            } => {
                write!(f, "ldelema {element_type}({array}")?;
                for index in indices {
                    write!(f, ", {index}")?;
                }
                write!(f, ")")
            }
            Self::BinaryNumeric {
                operator,
                left,
                right,
                check_overflow,
                sign,
            } => {
                write!(f, "binary.{operator}")?;
                if *check_overflow {
                    write!(f, ".ovf")?;
                }
                if *sign == Sign::Unsigned {
                    write!(f, ".un")?;
                }
                write!(f, "({left}, {right})")
            }
            Self::Conv {
                argument,
                kind,
                target_type,
                check_overflow,
            } => {
                let ovf = if *check_overflow { ".ovf" } else { "" };
                write!(f, "conv.{kind}{ovf} {target_type}({argument})")
            }
            Self::Call { method, args } => {
                write!(f, "call {method}(")?;
                write_args(f, args)?;
                write!(f, ")")
            }
            Self::Throw { argument } => write!(f, "throw({argument})"),
        }
    }
}
