use crate::proto::{Array, Node, ProtoError, Record, StructBuilder, TypeTag};

#[test]
fn get_moves_nodes_in_order_and_empties_builder() {
	let mut builder = StructBuilder::new();
	builder
		.push("x", 555_i32)
		.push("y", "meme string")
		.push("z", Array::from(vec![13_i32, 14, 88]))
		.add(Node::blob("raw", vec![1_u8, 2]));
	assert_eq!(builder.len(), 4);

	let node = builder.get("Base").expect("first finalization succeeds");
	assert!(builder.is_empty());
	assert_eq!(node.name(), "Base");
	assert_eq!(node.kind(), TypeTag::Struct);

	let record = node.get::<Record>().expect("struct payload");
	let names: Vec<&str> = record.iter().map(Node::name).collect();
	assert_eq!(names, ["x", "y", "z", "raw"]);
	assert_eq!(*record.field::<i32>("x").expect("x"), 555);
	assert_eq!(record.field::<String>("y").expect("y"), "meme string");
	assert_eq!(record.field::<Vec<i32>>("z").expect("z"), &[13, 14, 88]);
}

#[test]
fn second_get_is_misuse() {
	let mut builder = StructBuilder::new();
	builder.push("a", 1_u64);
	builder.get("first").expect("first finalization succeeds");

	let err = builder.get("second").expect_err("second finalization fails");
	assert!(matches!(err, ProtoError::BuilderMisuse { .. }));
}

#[test]
fn add_opt_skips_none() {
	let mut builder = StructBuilder::new();
	builder.add_opt(None).add_opt(Some(Node::float64("f", 1.0)));
	let node = builder.get("opt").expect("finalizes");
	assert_eq!(node.get::<Record>().expect("struct payload").len(), 1);
}

#[test]
fn nested_builders_transfer_ownership() {
	let mut inner = StructBuilder::new();
	inner.push("depth", 1_i32);
	let inner = inner.get("inner").expect("inner finalizes");

	let mut outer = StructBuilder::new();
	outer.add(inner).push("depth", 0_i32);
	let outer = outer.get("outer").expect("outer finalizes");

	let record = outer.get::<Record>().expect("struct payload");
	let inner = record.field::<Record>("inner").expect("inner struct");
	assert_eq!(*inner.field::<i32>("depth").expect("inner depth"), 1);
}

#[test]
fn discard_reports_pending_nodes() {
	StructBuilder::new().discard().expect("empty builder discards cleanly");

	let mut builder = StructBuilder::new();
	builder.push("lost", 1_i32);
	let err = builder.discard().expect_err("pending nodes are misuse");
	assert!(matches!(err, ProtoError::BuilderMisuse { .. }));
}

#[test]
fn dropping_finalized_builder_is_fine() {
	let mut builder = StructBuilder::new();
	builder.push("a", 1_i32);
	let _node = builder.get("done").expect("finalizes");
	drop(builder);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "un-transferred nodes")]
fn dropping_pending_builder_asserts_in_debug() {
	let mut builder = StructBuilder::new();
	builder.push("lost", 1_i32);
	drop(builder);
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "added to a finalized struct builder")]
fn push_after_get_asserts_in_debug() {
	let mut builder = StructBuilder::new();
	builder.get("done").expect("finalizes");
	builder.push("late", 1_i32);
}

#[cfg(not(debug_assertions))]
#[test]
fn push_after_get_drops_node_in_release() {
	let mut builder = StructBuilder::new();
	builder.get("done").expect("finalizes");
	builder.push("late", 1_i32).add(Node::int32("later", 2));
	assert!(builder.is_empty());
}
