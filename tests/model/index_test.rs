#[path = "../common/mod.rs"]
mod common;

use jaquel::model::{Member, ModelError, ModelIndex};
use jaquel::ods::DataType;

#[test]
fn test_entity_by_application_name_any_case() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);

    assert_eq!(index.entity("Unit").unwrap().aid, 54);
    assert_eq!(index.entity("unit").unwrap().aid, 54);
    assert_eq!(index.entity("UNIT").unwrap().aid, 54);
}

#[test]
fn test_entity_by_base_name() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);

    assert_eq!(index.entity("AoUnit").unwrap().aid, 54);
    assert_eq!(index.entity("aounit").unwrap().aid, 54);
    assert_eq!(index.entity("AoMeasurementQuantity").unwrap().name, "MeaQuantity");
}

#[test]
fn test_entity_by_numeric_token() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);

    assert_eq!(index.entity("54").unwrap().name, "Unit");
    let error = index.entity("47567").unwrap_err();
    assert_eq!(error.to_string(), "'47567' is not a valid entity aid.");
}

#[test]
fn test_unknown_entity_carries_suggestion() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);

    let error = index.entity("AoMeasurmentQuantity").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Entity 'AoMeasurmentQuantity' is unknown in model. Did you mean 'AoMeasurementQuantity'?"
    );

    // Nothing in the model is close to this one.
    let error = index.entity("zzzzzzzzzz").unwrap_err();
    assert_eq!(error.to_string(), "Entity 'zzzzzzzzzz' is unknown in model.");
}

#[test]
fn test_member_resolution_priority() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);
    let entity = index.entity("MeaQuantity").unwrap();

    // Application attribute name, any case.
    assert!(matches!(
        index.member(entity, "DATATYPE"),
        Some(Member::Attribute(a)) if a.name == "DataType"
    ));
    // Base attribute name.
    assert!(matches!(
        index.member(entity, "maximum"),
        Some(Member::Attribute(a)) if a.name == "Maximum"
    ));
    // Relation name when no attribute matches.
    assert!(matches!(
        index.member(entity, "unit"),
        Some(Member::Relation(r)) if r.entity_name == "Unit"
    ));
    assert!(index.member(entity, "does_not_exist").is_none());
}

#[test]
fn test_attribute_data_types() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);
    let entity = index.entity("MeaResult").unwrap();

    let attribute = index.attribute(entity, "measurement_begin").unwrap();
    assert_eq!(attribute.data_type, DataType::DtDate);
    assert_eq!(attribute.name, "MeasurementBegin");
}

#[test]
fn test_enum_value_lookup() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);
    let entity = index.entity("MeaQuantity").unwrap();
    let attribute = index.attribute(entity, "datatype").unwrap();

    assert_eq!(index.enum_value(entity, attribute, "DT_DOUBLE").unwrap(), 7);
    assert_eq!(index.enum_value(entity, attribute, "dt_double").unwrap(), 7);
}

#[test]
fn test_enum_value_suggestions() {
    let model = common::test_model();
    let index = ModelIndex::new(&model);
    let entity = index.entity("MeaQuantity").unwrap();
    let attribute = index.attribute(entity, "datatype").unwrap();

    let error = index.enum_value(entity, attribute, "DTLONG").unwrap_err();
    assert_eq!(
        error.to_string(),
        "Enum entry for 'DTLONG' does not exist. Did you mean 'DT_LONG'?"
    );

    let error = index.enum_value(entity, attribute, "INT32").unwrap_err();
    assert_eq!(error.to_string(), "Enum entry for 'INT32' does not exist.");
    assert!(matches!(error, ModelError::UnknownEnumEntry { .. }));
}
