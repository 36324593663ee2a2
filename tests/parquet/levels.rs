//! Property tests for column levels over nested group chains.

use capnparquet_parquet::{
    GroupNode, LogicalType, PhysicalType, PrimitiveNode, Repetition, SchemaDescriptor, SchemaNode,
};
use proptest::prelude::*;

fn repetition() -> impl Strategy<Value = Repetition> {
    prop_oneof![
        Just(Repetition::Required),
        Just(Repetition::Optional),
        Just(Repetition::Repeated),
    ]
}

/// Wraps a leaf in one group per entry, outermost first, under a message root.
fn chain(reps: &[Repetition], leaf: Repetition) -> SchemaDescriptor {
    let mut node = SchemaNode::from(PrimitiveNode::new(
        "leaf",
        leaf,
        PhysicalType::Int64,
        LogicalType::Int64,
    ))
    .into_ref();
    for (depth, rep) in reps.iter().enumerate().rev() {
        node = SchemaNode::from(GroupNode::new(
            format!("g{depth}"),
            *rep,
            LogicalType::None,
            vec![node],
        ))
        .into_ref();
    }
    let root = GroupNode::new("msg", Repetition::Required, LogicalType::None, vec![node]);
    SchemaDescriptor::new(SchemaNode::from(root).into_ref()).unwrap()
}

proptest! {
    #[test]
    fn levels_count_the_path(reps in prop::collection::vec(repetition(), 0..6), leaf in repetition()) {
        let descriptor = chain(&reps, leaf);
        prop_assert_eq!(descriptor.num_columns(), 1);

        let path: Vec<Repetition> = reps.iter().copied().chain([leaf]).collect();
        let definition = path.iter().filter(|r| **r != Repetition::Required).count();
        let repetition = path.iter().filter(|r| **r == Repetition::Repeated).count();

        let column = descriptor.column(0).unwrap();
        prop_assert_eq!(column.max_definition_level as usize, definition);
        prop_assert_eq!(column.max_repetition_level as usize, repetition);
        prop_assert_eq!(column.path.len(), reps.len() + 1);
        prop_assert_eq!(column.path.last().map(String::as_str), Some("leaf"));
    }
}
