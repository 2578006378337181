//! Pattern matcher integration tests.
//!
//! These tests drive the matchers through the public API only:
//! 1. The decompiler idioms the matchers exist for (`&&`, `||`, `==`, field loads)
//! 2. Totality: the exact set of matchers accepting each instruction shape
//! 3. Sensitivity of variable loads to the variable's reference kind
//! 4. Concurrent matching over a shared tree

use rayon::prelude::*;
use strum::{EnumCount, IntoEnumIterator};

use cilmatch::prelude::*;

/// A small function with a receiver, one reference local and one value local.
struct Fixture {
    func: IlFunction,
    this: IlVariableRc,
    obj: IlVariableRc,
    num: IlVariableRc,
    field: FieldRef,
}

impl Fixture {
    fn new() -> Result<Self> {
        let mut func = IlFunction::new();
        let this = func.declare_this(IlType::Object)?;
        let obj = func.new_local(IlType::String);
        let num = func.new_local(IlType::I32);
        let field = FieldRef::from_token(Token::from_parts(Token::TABLE_FIELD, 1))?;
        Ok(Self {
            func,
            this,
            obj,
            num,
            field,
        })
    }
}

/// Builds one representative instruction for the given opcode.
fn sample(op: OpCode, fx: &mut Fixture) -> IlInstruction {
    let load_obj = IlInstruction::load_local(&fx.obj);
    let load_num = IlInstruction::load_local(&fx.num);
    match op {
        OpCode::Nop => IlInstruction::Nop,
        OpCode::ConstI4 => IlInstruction::const_i4(0),
        OpCode::ConstI8 => IlInstruction::const_i8(1),
        OpCode::ConstF8 => IlInstruction::ConstF8 { value: 0.5 },
        OpCode::ConstNull => IlInstruction::ConstNull,
        OpCode::ConstString => IlInstruction::const_string("s"),
        OpCode::LoadLocal => IlInstruction::load_local(&fx.this),
        OpCode::LoadLocalAddr => IlInstruction::load_local_addr(&fx.num),
        OpCode::StoreLocal => IlInstruction::store_local(&fx.num, IlInstruction::const_i4(1)),
        OpCode::ArrayLength => IlInstruction::array_length(StackType::I, load_obj),
        OpCode::Leave => IlInstruction::leave(fx.func.body(), load_num),
        OpCode::Branch => IlInstruction::branch(fx.func.new_block()),
        OpCode::If => IlInstruction::if_else(
            load_num,
            IlInstruction::const_i4(1),
            IlInstruction::const_i4(0),
        ),
        OpCode::LogicNot => IlInstruction::logic_not(IlInstruction::compare(
            ComparisonKind::Inequality,
            load_obj,
            IlInstruction::ConstNull,
        )),
        OpCode::Compare => {
            IlInstruction::compare(ComparisonKind::Equality, load_num, IlInstruction::const_i4(0))
        }
        OpCode::CatchHandler => {
            let ex = fx.func.new_exception_variable(IlType::Object);
            IlInstruction::catch_handler(&ex, IlInstruction::Nop)
        }
        OpCode::LoadIndirect => IlInstruction::load_indirect(
            IlInstruction::load_field_addr(load_obj, fx.field),
            IlType::I32,
        ),
        OpCode::StoreIndirect => IlInstruction::store_indirect(
            IlInstruction::load_static_field_addr(fx.field),
            load_num,
            IlType::I32,
        ),
        OpCode::LoadFieldAddr => IlInstruction::load_field_addr(load_obj, fx.field),
        OpCode::LoadStaticFieldAddr => IlInstruction::load_static_field_addr(fx.field),
        OpCode::LoadElementAddr => {
            IlInstruction::load_element_addr(load_obj, vec![load_num], IlType::I32)
        }
        OpCode::BinaryNumeric => {
            IlInstruction::binary(BinaryNumericOperator::Add, load_num, IlInstruction::const_i4(1))
        }
        OpCode::Conv => IlInstruction::conv(load_num, ConversionKind::SignExtend, StackType::I8),
        OpCode::Call => IlInstruction::Call {
            method: MethodRef::new(Token::from_parts(Token::TABLE_METHOD_DEF, 1)),
            args: vec![load_obj],
        },
        OpCode::Throw => IlInstruction::Throw {
            argument: Box::new(load_obj),
        },
    }
}

/// Runs every matcher against `inst` and returns the names of those that matched,
/// sorted.
fn matching(inst: &IlInstruction, fx: &Fixture) -> Vec<&'static str> {
    let body = fx.func.body();
    let checks = [
        ("is_nop", inst.is_nop()),
        ("is_const_null", inst.is_const_null()),
        ("is_const_i4", inst.is_const_i4(0)),
        ("match_const_i4", inst.match_const_i4().is_some()),
        ("match_const_i8", inst.match_const_i8().is_some()),
        ("match_const_int", inst.match_const_int().is_some()),
        ("match_const_string", inst.match_const_string().is_some()),
        ("is_load_local", inst.is_load_local(&fx.num)),
        ("is_load_local_addr", inst.is_load_local_addr(&fx.num)),
        ("match_load_local", inst.match_load_local().is_some()),
        ("match_load_local_addr", inst.match_load_local_addr().is_some()),
        ("is_load_local_ref", inst.is_load_local_ref(&fx.obj)),
        ("match_load_local_ref", inst.match_load_local_ref().is_some()),
        ("is_load_this", inst.is_load_this()),
        ("match_store_local", inst.match_store_local().is_some()),
        ("match_store_local_to", inst.match_store_local_to(&fx.num).is_some()),
        ("match_array_length", inst.match_array_length(StackType::I).is_some()),
        ("match_return", inst.match_return().is_some()),
        ("match_branch", inst.match_branch().is_some()),
        ("match_leave", inst.match_leave().is_some()),
        ("match_leave_to", inst.match_leave_to(body).is_some()),
        ("match_void_leave", inst.match_void_leave().is_some()),
        ("is_void_leave_to", inst.is_void_leave_to(body)),
        ("match_if", inst.match_if().is_some()),
        ("match_if_then", inst.match_if_then().is_some()),
        ("match_catch_handler", inst.match_catch_handler().is_some()),
        ("match_logic_and", inst.match_logic_and().is_some()),
        ("match_logic_or", inst.match_logic_or().is_some()),
        ("match_logic_not", inst.match_logic_not().is_some()),
        ("match_compare", inst.match_compare(ComparisonKind::Equality).is_some()),
        ("match_comp_equals", inst.match_comp_equals().is_some()),
        ("match_comp_not_equals", inst.match_comp_not_equals().is_some()),
        ("is_field_addr", inst.is_field_addr()),
        ("match_field_addr", inst.match_field_addr().is_some()),
        ("match_static_field_addr", inst.match_static_field_addr().is_some()),
        ("is_static_field_load", inst.is_static_field_load(fx.field)),
        ("match_static_field_load", inst.match_static_field_load().is_some()),
        ("match_field_load", inst.match_field_load().is_some()),
        ("match_static_field_store", inst.match_static_field_store().is_some()),
        ("match_field_store", inst.match_field_store().is_some()),
        ("is_binary_numeric", inst.is_binary_numeric(BinaryNumericOperator::Add)),
        (
            "match_binary_numeric_op",
            inst.match_binary_numeric_op(BinaryNumericOperator::Add).is_some(),
        ),
        ("match_binary_numeric", inst.match_binary_numeric().is_some()),
        (
            "unwrap_conv",
            !std::ptr::eq(inst.unwrap_conv(ConversionKind::SignExtend), inst),
        ),
    ];
    let mut hits: Vec<&'static str> = checks
        .iter()
        .filter(|(_, matched)| *matched)
        .map(|(name, _)| *name)
        .collect();
    hits.sort_unstable();
    hits
}

/// The matchers expected to accept the instruction built by [`sample`] for `op`.
fn expected_matches(op: OpCode) -> Vec<&'static str> {
    let mut hits = match op {
        OpCode::Nop => vec!["is_nop"],
        OpCode::ConstI4 => vec!["is_const_i4", "match_const_i4", "match_const_int"],
        OpCode::ConstI8 => vec!["match_const_i8", "match_const_int"],
        OpCode::ConstF8 => vec![],
        OpCode::ConstNull => vec!["is_const_null"],
        OpCode::ConstString => vec!["match_const_string"],
        // ldloc this, with this of type object
        OpCode::LoadLocal => vec!["match_load_local", "match_load_local_ref", "is_load_this"],
        // ldloca num, with num of type int
        OpCode::LoadLocalAddr => vec![
            "is_load_local_addr",
            "match_load_local_addr",
            "match_load_local_ref",
        ],
        OpCode::StoreLocal => vec!["match_store_local", "match_store_local_to"],
        OpCode::ArrayLength => vec!["match_array_length"],
        OpCode::Leave => vec!["match_return", "match_leave", "match_leave_to"],
        OpCode::Branch => vec!["match_branch"],
        OpCode::If => vec!["match_if", "match_logic_and", "match_logic_or"],
        OpCode::LogicNot => vec!["match_logic_not", "match_comp_equals"],
        OpCode::Compare => vec!["match_compare", "match_comp_equals"],
        OpCode::CatchHandler => vec!["match_catch_handler"],
        OpCode::LoadIndirect => vec!["match_field_load"],
        OpCode::StoreIndirect => vec!["match_static_field_store"],
        OpCode::LoadFieldAddr => vec!["is_field_addr", "match_field_addr"],
        OpCode::LoadStaticFieldAddr => vec!["is_field_addr", "match_static_field_addr"],
        OpCode::LoadElementAddr => vec![],
        OpCode::BinaryNumeric => vec![
            "is_binary_numeric",
            "match_binary_numeric_op",
            "match_binary_numeric",
        ],
        OpCode::Conv => vec!["unwrap_conv"],
        OpCode::Call => vec![],
        OpCode::Throw => vec![],
    };
    hits.sort_unstable();
    hits
}

#[test]
fn test_logic_or_idiom() -> Result<()> {
    let fx = Fixture::new()?;
    let c = IlInstruction::load_local(&fx.num);
    let b = IlInstruction::load_local(&fx.obj);
    let inst = IlInstruction::if_else(c.clone(), IlInstruction::const_i4(1), b.clone());

    let (lhs, rhs) = inst.match_logic_or().expect("|| idiom");
    assert_eq!(lhs, &c);
    assert_eq!(rhs, &b);
    let children = inst.children();
    assert!(std::ptr::eq(lhs, children[0]));
    assert!(std::ptr::eq(rhs, children[2]));
    Ok(())
}

#[test]
fn test_logic_and_idiom() -> Result<()> {
    let fx = Fixture::new()?;
    let c = IlInstruction::load_local(&fx.num);
    let b = IlInstruction::load_local(&fx.obj);
    let inst = IlInstruction::if_else(c.clone(), b.clone(), IlInstruction::const_i4(0));

    let (lhs, rhs) = inst.match_logic_and().expect("&& idiom");
    assert_eq!(lhs, &c);
    assert_eq!(rhs, &b);
    let children = inst.children();
    assert!(std::ptr::eq(lhs, children[0]));
    assert!(std::ptr::eq(rhs, children[1]));
    assert_eq!(inst.match_logic_or(), None);
    Ok(())
}

#[test]
fn test_equality_canonical_forms() -> Result<()> {
    let fx = Fixture::new()?;
    let x = IlInstruction::load_local(&fx.obj);
    let y = IlInstruction::ConstNull;

    let negated = IlInstruction::logic_not(IlInstruction::compare(
        ComparisonKind::Inequality,
        x.clone(),
        y.clone(),
    ));
    let direct = IlInstruction::compare(ComparisonKind::Equality, x.clone(), y.clone());

    assert_eq!(negated.match_comp_equals(), Some((&x, &y)));
    assert_eq!(direct.match_comp_equals(), Some((&x, &y)));

    let (l, r) = negated.match_comp_equals().expect("negated ==");
    let comparison = negated.children()[0];
    assert!(std::ptr::eq(l, comparison.children()[0]));
    assert!(std::ptr::eq(r, comparison.children()[1]));

    let (l, r) = direct.match_comp_equals().expect("direct ==");
    assert!(std::ptr::eq(l, direct.children()[0]));
    assert!(std::ptr::eq(r, direct.children()[1]));
    Ok(())
}

#[test]
fn test_instance_field_load_is_not_static() -> Result<()> {
    let fx = Fixture::new()?;
    let target = IlInstruction::load_local(&fx.obj);
    let inst = IlInstruction::load_indirect(
        IlInstruction::load_field_addr(target.clone(), fx.field),
        IlType::I32,
    );

    assert_eq!(inst.match_field_load(), Some((&target, fx.field)));
    let (extracted, _) = inst.match_field_load().expect("instance field load");
    let address = inst.children()[0];
    assert!(std::ptr::eq(extracted, address.children()[0]));
    assert_eq!(inst.match_static_field_load(), None);
    assert!(!inst.is_static_field_load(fx.field));
    Ok(())
}

#[test]
fn test_every_opcode_matches_exactly_its_matchers() -> Result<()> {
    let mut fx = Fixture::new()?;
    let mut seen = 0;
    for op in OpCode::iter() {
        let inst = sample(op, &mut fx);
        assert_eq!(inst.opcode(), op);
        assert_eq!(matching(&inst, &fx), expected_matches(op), "{op}: {inst}");
        for child in inst.children() {
            let _ = matching(child, &fx);
        }
        seen += 1;
    }
    assert_eq!(seen, OpCode::COUNT);
    Ok(())
}

#[test]
fn test_reference_kind_selects_load_shape() -> Result<()> {
    let fx = Fixture::new()?;

    // String local: read by value
    assert!(IlInstruction::load_local(&fx.obj).is_load_local_ref(&fx.obj));
    assert!(!IlInstruction::load_local_addr(&fx.obj).is_load_local_ref(&fx.obj));

    // Int32 local: read by address
    assert!(IlInstruction::load_local_addr(&fx.num).is_load_local_ref(&fx.num));
    assert!(!IlInstruction::load_local(&fx.num).is_load_local_ref(&fx.num));

    // Receiver of type object: read by value
    assert_eq!(
        IlInstruction::load_local(&fx.this).match_load_local_ref(),
        Some(&fx.this)
    );
    Ok(())
}

#[test]
fn test_return_only_from_function_body() -> Result<()> {
    let mut fx = Fixture::new()?;
    let inner = fx.func.new_container(ContainerKind::Loop);
    let value = IlInstruction::load_local(&fx.num);

    let ret = IlInstruction::leave(fx.func.body(), value.clone());
    assert_eq!(ret.match_return(), Some(&value));

    let exit_loop = IlInstruction::leave(inner, value.clone());
    assert_eq!(exit_loop.match_return(), None);
    assert_eq!(exit_loop.match_leave(), Some((inner, &value)));
    Ok(())
}

#[test]
fn test_concurrent_matching_on_shared_tree() -> Result<()> {
    let mut fx = Fixture::new()?;
    let trees: Vec<IlInstruction> = OpCode::iter().map(|op| sample(op, &mut fx)).collect();

    let sequential: Vec<Vec<&str>> = trees.iter().map(|t| matching(t, &fx)).collect();
    for _ in 0..8 {
        let parallel: Vec<Vec<&str>> = trees.par_iter().map(|t| matching(t, &fx)).collect();
        assert_eq!(parallel, sequential);
    }
    Ok(())
}
