#![no_main]

use cilmatch::prelude::*;
use libfuzzer_sys::fuzz_target;
use strum::{EnumCount, IntoEnumIterator};

const MAX_DEPTH: usize = 6;

/// Turns fuzzer bytes into an instruction tree. Runs out of input as `nop`.
struct Decoder<'a> {
    data: &'a [u8],
    func: IlFunction,
    vars: Vec<IlVariableRc>,
}

impl<'a> Decoder<'a> {
    fn new(data: &'a [u8]) -> Self {
        let mut func = IlFunction::new();
        let mut vars = Vec::new();
        if let Ok(this) = func.declare_this(IlType::Object) {
            vars.push(this);
        }
        vars.push(func.new_local(IlType::String));
        vars.push(func.new_local(IlType::I32));
        vars.push(func.new_local(IlType::GenericParam(0)));
        vars.push(func.new_stack_slot(IlType::I64));
        Self { data, func, vars }
    }

    fn byte(&mut self) -> u8 {
        match self.data.split_first() {
            Some((b, rest)) => {
                self.data = rest;
                *b
            }
            None => 0,
        }
    }

    fn pick<T: IntoEnumIterator + EnumCount>(&mut self) -> T {
        let n = usize::from(self.byte()) % T::COUNT;
        T::iter().nth(n).unwrap()
    }

    fn var(&mut self) -> IlVariableRc {
        let n = usize::from(self.byte()) % self.vars.len();
        self.vars[n].clone()
    }

    fn field(&mut self) -> FieldRef {
        FieldRef::new(Token::from_parts(Token::TABLE_FIELD, u32::from(self.byte() % 4)))
    }

    fn container(&mut self) -> BlockContainer {
        if self.byte() % 2 == 0 {
            self.func.body()
        } else {
            self.func.new_container(ContainerKind::Block)
        }
    }

    fn child(&mut self, depth: usize) -> IlInstruction {
        if depth >= MAX_DEPTH || self.data.is_empty() {
            return IlInstruction::Nop;
        }
        self.decode(depth + 1)
    }

    fn decode(&mut self, depth: usize) -> IlInstruction {
        let op: OpCode = self.pick();
        match op {
            OpCode::Nop => IlInstruction::Nop,
            OpCode::ConstI4 => IlInstruction::const_i4(i32::from(self.byte() % 3)),
            OpCode::ConstI8 => IlInstruction::const_i8(i64::from(self.byte())),
            OpCode::ConstF8 => IlInstruction::ConstF8 {
                value: f64::from(self.byte()),
            },
            OpCode::ConstNull => IlInstruction::ConstNull,
            OpCode::ConstString => IlInstruction::const_string("fuzz"),
            OpCode::LoadLocal => IlInstruction::load_local(&self.var()),
            OpCode::LoadLocalAddr => IlInstruction::load_local_addr(&self.var()),
            OpCode::StoreLocal => {
                let v = self.var();
                IlInstruction::store_local(&v, self.child(depth))
            }
            OpCode::ArrayLength => {
                let ty: StackType = self.pick();
                IlInstruction::array_length(ty, self.child(depth))
            }
            OpCode::Leave => {
                let target = self.container();
                IlInstruction::leave(target, self.child(depth))
            }
            OpCode::Branch => IlInstruction::branch(self.func.new_block()),
            OpCode::If => {
                let c = self.child(depth);
                let t = self.child(depth);
                let f = self.child(depth);
                IlInstruction::if_else(c, t, f)
            }
            OpCode::LogicNot => IlInstruction::logic_not(self.child(depth)),
            OpCode::Compare => {
                let kind: ComparisonKind = self.pick();
                let l = self.child(depth);
                let r = self.child(depth);
                IlInstruction::compare(kind, l, r)
            }
            OpCode::CatchHandler => {
                let ex = self.func.new_exception_variable(IlType::Object);
                IlInstruction::catch_handler(&ex, self.child(depth))
            }
            OpCode::LoadIndirect => IlInstruction::load_indirect(self.child(depth), IlType::I32),
            OpCode::StoreIndirect => {
                let t = self.child(depth);
                let v = self.child(depth);
                IlInstruction::store_indirect(t, v, IlType::I32)
            }
            OpCode::LoadFieldAddr => {
                let f = self.field();
                IlInstruction::load_field_addr(self.child(depth), f)
            }
            OpCode::LoadStaticFieldAddr => IlInstruction::load_static_field_addr(self.field()),
            OpCode::LoadElementAddr => {
                let a = self.child(depth);
                let i = self.child(depth);
                IlInstruction::load_element_addr(a, vec![i], IlType::I32)
            }
            OpCode::BinaryNumeric => {
                let operator: BinaryNumericOperator = self.pick();
                let l = self.child(depth);
                let r = self.child(depth);
                IlInstruction::binary(operator, l, r)
            }
            OpCode::Conv => {
                let kind: ConversionKind = self.pick();
                let check_overflow = self.byte() % 2 == 1;
                IlInstruction::Conv {
                    argument: Box::new(self.child(depth)),
                    kind,
                    target_type: StackType::I4,
                    check_overflow,
                }
            }
            OpCode::Call => IlInstruction::Call {
                method: MethodRef::new(Token::from_parts(Token::TABLE_METHOD_DEF, 1)),
                args: vec![self.child(depth)],
            },
            OpCode::Throw => IlInstruction::Throw {
                argument: Box::new(self.child(depth)),
            },
        }
    }
}

fn probe(inst: &IlInstruction, vars: &[IlVariableRc], body: BlockContainer) {
    let _ = inst.is_nop();
    let _ = inst.is_const_null();
    let _ = inst.match_const_int();
    let _ = inst.match_const_string();
    let _ = inst.match_load_local_ref();
    let _ = inst.is_load_this();
    let _ = inst.match_array_length(StackType::I4);
    let _ = inst.match_return();
    let _ = inst.match_branch();
    let _ = inst.match_leave_to(body);
    let _ = inst.is_void_leave_to(body);
    let _ = inst.match_if_then();
    let _ = inst.match_catch_handler();
    let _ = inst.match_comp_not_equals();
    let _ = inst.match_binary_numeric();
    for v in vars {
        let _ = inst.is_load_local(v);
        let _ = inst.is_load_local_addr(v);
        let _ = inst.is_load_local_ref(v);
        let _ = inst.match_store_local_to(v);
    }

    if let Some((lhs, rhs)) = inst.match_logic_and() {
        assert!(inst.match_if().is_some());
        let _ = (lhs.opcode(), rhs.opcode());
    }
    if inst.match_logic_or().is_some() {
        assert!(inst.match_if().is_some());
    }
    if let Some((l, r)) = inst.match_comp_equals() {
        let direct = inst.match_compare(ComparisonKind::Equality);
        let negated = inst
            .match_logic_not()
            .and_then(|arg| arg.match_compare(ComparisonKind::Inequality));
        assert_eq!(direct.or(negated), Some((l, r)));
    }
    if let Some(field) = inst.match_static_field_load() {
        assert!(inst.is_static_field_load(field));
        assert!(inst.match_field_load().is_none());
    }
    if inst.match_field_store().is_some() {
        assert!(inst.match_static_field_store().is_none());
    }
    let unwrapped = inst.unwrap_conv(ConversionKind::Nop);
    assert!(unwrapped.unwrap_conv(ConversionKind::Nop) == unwrapped);

    for child in inst.children() {
        probe(child, vars, body);
    }
}

fuzz_target!(|data: &[u8]| {
    let mut decoder = Decoder::new(data);
    let tree = decoder.decode(0);
    probe(&tree, &decoder.vars, decoder.func.body());
});
