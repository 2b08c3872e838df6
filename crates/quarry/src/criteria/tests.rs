use super::*;
use crate::{
    test_fixtures::{Author, Book},
    value::Value,
};
use chrono::{NaiveDate, NaiveTime};

#[test]
fn fresh_criteria_has_no_groups_and_is_invalid() {
    let criteria = Criteria::<Book>::new();

    assert!(criteria.groups_empty());
    assert!(criteria.groups().is_empty());
    assert_eq!(criteria.order_by_clause(), None);
    assert!(!criteria.is_distinct());
    assert_eq!(criteria.limit(), None);
    assert_eq!(criteria.offset(), None);
    assert_eq!(criteria.for_update(), None);
}

#[test]
fn first_predicate_lazily_creates_exactly_one_group() {
    let mut criteria = Criteria::<Book>::new();
    criteria.and_eq("name", "dune").unwrap();

    assert_eq!(criteria.groups().len(), 1);
    assert_eq!(criteria.groups()[0].len(), 1);
    assert!(criteria.groups()[0].is_valid());
}

#[test]
fn or_on_a_groupless_builder_is_a_noop() {
    let mut criteria = Criteria::<Book>::new();
    criteria.or().and_eq("name", "dune").unwrap();

    assert_eq!(criteria.groups().len(), 1);
}

#[test]
fn or_after_a_predicate_starts_a_second_group() {
    let mut criteria = Criteria::<Book>::new();
    criteria.and_eq("name", "dune").unwrap();
    criteria.or().and_eq("author", 9_u64).unwrap();

    assert_eq!(criteria.groups().len(), 2);
    assert_eq!(criteria.groups()[0].len(), 1);
    assert_eq!(criteria.groups()[1].len(), 1);
}

// the round trip pinned by the dispatch contract: (name = X) or (author in ids)
#[test]
fn disjunctive_round_trip_preserves_group_structure() {
    let mut criteria = Criteria::<Book>::equal_to("name", "X").unwrap();
    criteria.or().and_in("author", [1_u64, 2, 3]).unwrap();

    assert_eq!(criteria.groups().len(), 2);

    let first = &criteria.groups()[0].criteria()[0];
    assert_eq!(first.predicate(), "name =");
    assert!(first.is_single_value());
    assert_eq!(first.value(), Some(&Value::Text("X".to_string())));

    let second = &criteria.groups()[1].criteria()[0];
    assert_eq!(second.predicate(), "author in");
    assert!(second.is_list_value());
    assert_eq!(
        second.values(),
        Some(&[Value::Uint(1), Value::Uint(2), Value::Uint(3)][..])
    );
}

#[test]
fn no_value_operators_store_no_operand() {
    let mut criteria = Criteria::<Book>::new();
    criteria
        .and_is_null("author")
        .unwrap()
        .and_is_not_null("name")
        .unwrap();

    let group = &criteria.groups()[0];
    assert_eq!(group.criteria()[0].predicate(), "author is null");
    assert!(group.criteria()[0].is_no_value());
    assert_eq!(group.criteria()[0].value(), None);
    assert_eq!(group.criteria()[1].predicate(), "name is not null");
}

#[test]
fn empty_in_list_is_preserved_as_is() {
    let mut criteria = Criteria::<Book>::new();
    criteria.and_in("id", Vec::<u64>::new()).unwrap();

    let criterion = &criteria.groups()[0].criteria()[0];
    assert!(criterion.is_list_value());
    assert_eq!(criterion.values(), Some(&[][..]));
}

#[test]
fn between_stores_both_operands_in_order() {
    let mut criteria = Criteria::<Book>::new();
    criteria.and_between("id", 5_u64, 10_u64).unwrap();

    let criterion = &criteria.groups()[0].criteria()[0];
    assert_eq!(criterion.predicate(), "id between");
    assert!(criterion.is_between_value());
    assert_eq!(criterion.value(), Some(&Value::Uint(5)));
    assert_eq!(criterion.second_value(), Some(&Value::Uint(10)));
}

#[test]
fn operand_shape_mismatch_is_rejected_and_appends_nothing() {
    let mut criteria = Criteria::<Book>::new();

    // between with a single operand (the typed rendering of a null operand)
    let err = criteria
        .and("id", Operator::Between, Args::one(5_u64))
        .unwrap_err();
    assert!(err.is_invalid_argument());

    // equality with no operand
    let err = criteria
        .and("id", Operator::EqualTo, Args::None)
        .unwrap_err();
    assert!(err.is_invalid_argument());

    assert!(criteria.groups_empty());
}

#[test]
fn unrecognized_field_is_rejected() {
    let mut criteria = Criteria::<Book>::new();

    let err = criteria.and_eq("publisher", "acme").unwrap_err();
    assert!(err.is_invalid_argument());
    assert!(criteria.groups_empty());
}

#[test]
fn like_is_restricted_to_textual_fields() {
    let mut criteria = Criteria::<Book>::new();

    let err = criteria.and_like("id", "4%").unwrap_err();
    assert!(err.is_invalid_argument());

    criteria.and_like("name", "du%").unwrap();
    assert_eq!(criteria.groups()[0].criteria()[0].predicate(), "name like");
}

#[test]
fn datetime_operand_truncates_against_date_column() {
    let dt = NaiveDate::from_ymd_opt(1965, 8, 1)
        .unwrap()
        .and_hms_opt(16, 30, 0)
        .unwrap();

    let mut criteria = Criteria::<Author>::new();
    criteria.and_eq("birthday", dt).unwrap();

    assert_eq!(
        criteria.groups()[0].criteria()[0].value(),
        Some(&Value::Date(dt.date()))
    );
}

#[test]
fn date_operand_widens_against_datetime_column() {
    let d = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();

    let mut criteria = Criteria::<Author>::new();
    criteria.and_gte("created", d).unwrap();

    assert_eq!(
        criteria.groups()[0].criteria()[0].value(),
        Some(&Value::DateTime(d.and_time(NaiveTime::MIN)))
    );
}

#[test]
fn temporal_coercion_applies_to_between_operands() {
    let lo = NaiveDate::from_ymd_opt(1960, 1, 1)
        .unwrap()
        .and_hms_opt(1, 0, 0)
        .unwrap();
    let hi = NaiveDate::from_ymd_opt(1970, 1, 1)
        .unwrap()
        .and_hms_opt(23, 0, 0)
        .unwrap();

    let mut criteria = Criteria::<Author>::new();
    criteria.and_between("birthday", lo, hi).unwrap();

    let criterion = &criteria.groups()[0].criteria()[0];
    assert_eq!(criterion.value(), Some(&Value::Date(lo.date())));
    assert_eq!(criterion.second_value(), Some(&Value::Date(hi.date())));
}

#[test]
fn order_by_composes_alternating_directions() {
    let mut criteria = Criteria::<Book>::new();
    criteria
        .asc_order_by(&["id", "name"])
        .unwrap()
        .desc_order_by(&["author"])
        .unwrap();

    assert_eq!(
        criteria.order_by_clause(),
        Some("id asc,name asc,author desc")
    );
}

#[test]
fn order_by_empty_field_list_fails_without_mutation() {
    let mut criteria = Criteria::<Book>::new();
    criteria.asc_order_by(&["id"]).unwrap();

    let err = criteria.order_by(OrderDirection::Desc, &[]).unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(criteria.order_by_clause(), Some("id asc"));
}

#[test]
fn order_by_unrecognized_field_fails_without_mutation() {
    let mut criteria = Criteria::<Book>::new();
    criteria.asc_order_by(&["id"]).unwrap();

    // second field is bad; the first must not leak into the clause
    let err = criteria
        .order_by(OrderDirection::Desc, &["name", "publisher"])
        .unwrap_err();
    assert!(err.is_invalid_argument());
    assert_eq!(criteria.order_by_clause(), Some("id asc"));
}

#[test]
fn order_by_maps_field_names_to_columns() {
    let mut criteria = Criteria::<Author>::new();
    criteria.desc_order_by(&["birthday"]).unwrap();

    assert_eq!(criteria.order_by_clause(), Some("birthday desc"));
}

#[test]
fn directive_setters_round_trip() {
    let mut criteria = Criteria::<Book>::new();
    criteria
        .set_limit(25)
        .set_offset(50)
        .set_distinct(true)
        .set_for_update(true);

    assert_eq!(criteria.limit(), Some(25));
    assert_eq!(criteria.offset(), Some(50));
    assert!(criteria.is_distinct());
    assert_eq!(criteria.for_update(), Some(true));
}

#[test]
fn clear_resets_to_fresh_state() {
    let mut criteria = Criteria::<Book>::new();
    criteria.and_eq("name", "dune").unwrap();
    criteria.asc_order_by(&["id"]).unwrap();
    criteria.set_limit(10).set_distinct(true).set_for_update(true);

    criteria.clear();

    assert!(criteria.groups_empty());
    assert_eq!(criteria.order_by_clause(), None);
    assert!(!criteria.is_distinct());
    assert_eq!(criteria.limit(), None);
    assert_eq!(criteria.offset(), None);
    assert_eq!(criteria.for_update(), None);
}

#[test]
fn static_constructors_seed_one_predicate() {
    let criteria = Criteria::<Book>::null("author").unwrap();

    assert_eq!(criteria.groups().len(), 1);
    assert!(criteria.groups()[0].criteria()[0].is_no_value());

    let criteria = Criteria::<Book>::of("id", Operator::NotIn, Args::many([7_u64, 8])).unwrap();
    assert_eq!(criteria.groups()[0].criteria()[0].predicate(), "id not in");
}

mod props {
    use super::*;
    use proptest::prelude::*;

    const FIELDS: [&str; 3] = ["id", "name", "author"];

    proptest! {
        // every order_by call appends exactly its field count of
        // "<col> <dir>" segments, comma-joined
        #[test]
        fn order_clause_segment_count_matches_calls(
            picks in proptest::collection::vec((0_usize..3, proptest::bool::ANY), 1..8)
        ) {
            let mut criteria = Criteria::<Book>::new();
            for (index, asc) in &picks {
                let direction = if *asc { OrderDirection::Asc } else { OrderDirection::Desc };
                criteria.order_by(direction, &[FIELDS[*index]]).unwrap();
            }

            let clause = criteria.order_by_clause().unwrap();
            let segments: Vec<&str> = clause.split(',').collect();
            prop_assert_eq!(segments.len(), picks.len());

            for (segment, (index, asc)) in segments.iter().zip(&picks) {
                let direction = if *asc { "asc" } else { "desc" };
                prop_assert_eq!(*segment, format!("{} {direction}", FIELDS[*index]));
            }
        }
    }
}
