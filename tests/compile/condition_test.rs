#[path = "../common/mod.rs"]
mod common;

use jaquel::compile::jaquel_to_ods;
use jaquel::ods::{Operand, Operator};
use serde_json::json;

#[test]
fn test_implicit_equality_leaf() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(&model, &json!({"AoUnit": {"name": "m"}})).unwrap();

    assert_eq!(common::where_shape(&statement), "c");
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpEq);
    assert_eq!(conditions[0].operand, Some(Operand::strings(vec!["m".into()])));
}

#[test]
fn test_sibling_keys_are_joined_by_and() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"name": "m", "factor": {"$gt": 0.5}}}),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "c&c");
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].attribute, "Name");
    assert_eq!(conditions[1].attribute, "Factor");
    assert_eq!(conditions[1].operator, Operator::OpGt);
}

#[test]
fn test_operator_set() {
    let model = common::test_model();
    let cases = [
        ("$eq", Operator::OpEq),
        ("$neq", Operator::OpNeq),
        ("$lt", Operator::OpLt),
        ("$gt", Operator::OpGt),
        ("$lte", Operator::OpLte),
        ("$gte", Operator::OpGte),
    ];
    for (keyword, operator) in cases {
        let (_, statement) =
            jaquel_to_ods(&model, &json!({"AoUnit": {"factor": {keyword: 1.5}}})).unwrap();
        let conditions = common::leaf_conditions(&statement);
        assert_eq!(conditions[0].operator, operator, "for {}", keyword);
        assert_eq!(conditions[0].operand, Some(Operand::doubles(vec![1.5])));
    }
}

#[test]
fn test_in_set_with_array() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoMeasurementQuantity": {"name": {"$in": ["first", "second"]}}}),
    )
    .unwrap();

    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpInset);
    assert_eq!(
        conditions[0].operand,
        Some(Operand::strings(vec!["first".into(), "second".into()]))
    );
}

#[test]
fn test_or_group_is_fully_bracketed() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({
            "AoMeasurement": {
                "$or": [
                    {"measurement_quantities.maximum": {"$gte": 1, "$lt": 2}},
                    {"measurement_quantities.maximum": {"$gte": 3, "$lt": 4}},
                    {"measurement_quantities.maximum": {"$gte": 6, "$lt": 7}}
                ]
            }
        }),
    )
    .unwrap();

    assert_eq!(
        common::where_shape(&statement),
        "((c&c)|(c&c)|(c&c))"
    );

    // The identical hop is traversed six times, one join remains.
    assert_eq!(statement.joins.len(), 1);

    let values: Vec<f64> = common::leaf_conditions(&statement)
        .iter()
        .map(|c| match &c.operand {
            Some(Operand::DoubleArray(array)) => array.values[0],
            other => panic!("unexpected operand {:?}", other),
        })
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0, 4.0, 6.0, 7.0]);
}

#[test]
fn test_single_branch_group_skips_outer_brackets() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"$and": [{"name": "m"}]}}),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "(c)");
}

#[test]
fn test_group_after_leaf_gets_leading_conjunction() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({
            "AoUnit": {
                "name": {"$like": "m*"},
                "$or": [{"factor": 1.0}, {"offset": 0.0}]
            }
        }),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "c&((c)|(c))");
}

#[test]
fn test_leaf_after_group_gets_leading_conjunction() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({
            "AoUnit": {
                "$or": [{"factor": 1.0}, {"offset": 0.0}],
                "name": {"$like": "m*"}
            }
        }),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "((c)|(c))&c");
}

#[test]
fn test_not_wraps_single_object() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"$not": {"name": "m", "factor": 1.0}}}),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "!(c&c)");
}

#[test]
fn test_nested_groups() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({
            "AoUnit": {
                "$and": [
                    {"$or": [{"name": "m"}, {"name": "s"}]},
                    {"factor": {"$gt": 0}}
                ]
            }
        }),
    )
    .unwrap();

    assert_eq!(common::where_shape(&statement), "((((c)|(c)))&(c))");
}

#[test]
fn test_null_and_notnull_take_no_operand() {
    let model = common::test_model();

    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoMeasurement": {"measurement_begin": {"$null": 1}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpIsNull);
    assert_eq!(conditions[0].operand, None);

    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoMeasurement": {"measurement_begin": {"$notnull": 1}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpIsNotNull);
    assert_eq!(conditions[0].operand, None);
}

#[test]
fn test_case_insensitive_options_remap_string_operators() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"name": {"$like": "m*", "$options": "i"}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpCiLike);

    // Implicit equality is remapped as well.
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"name": {"$eq": "M", "$options": "i"}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpCiEq);
}

#[test]
fn test_options_are_a_no_op_for_non_string_attributes() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoUnit": {"factor": {"$gt": 1.0, "$options": "i"}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operator, Operator::OpGt);
}

#[test]
fn test_unit_annotation_lands_on_sibling_leaf() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoMeasurementQuantity": {"maximum": {"$gte": 1.0, "$unit": 4711}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].unit_id, 4711);
    assert_eq!(conditions[0].operator, Operator::OpGte);
}

#[test]
fn test_enum_string_and_numeric_forms_compile_identically() {
    let model = common::test_model();
    let by_name = jaquel_to_ods(
        &model,
        &json!({"AoMeasurementQuantity": {"datatype": "DT_DOUBLE"}}),
    )
    .unwrap();
    let by_value =
        jaquel_to_ods(&model, &json!({"AoMeasurementQuantity": {"datatype": 7}})).unwrap();

    assert_eq!(by_name.1, by_value.1);
    let conditions = common::leaf_conditions(&by_name.1);
    assert_eq!(conditions[0].operand, Some(Operand::longs(vec![7])));
}

#[test]
fn test_enum_array_mixes_names_and_numbers() {
    let model = common::test_model();
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoMeasurementQuantity": {"datatype": {"$in": ["DT_STRING", 7]}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operand, Some(Operand::longs(vec![1, 7])));
}

#[test]
fn test_boolean_and_integer_coercion() {
    let model = common::test_model();

    // DT_SHORT goes into the long array.
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoLocalColumn": {"independent": {"$in": [0, 1]}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operand, Some(Operand::longs(vec![0, 1])));

    // DT_LONG scalar.
    let (_, statement) = jaquel_to_ods(
        &model,
        &json!({"AoSubmatrix": {"number_of_rows": {"$gt": 100}}}),
    )
    .unwrap();
    let conditions = common::leaf_conditions(&statement);
    assert_eq!(conditions[0].operand, Some(Operand::longs(vec![100])));
}
