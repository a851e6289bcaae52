//! End-to-end query rendering tests against exact wire strings.

use geo_types::{polygon, Point};
use pretty_assertions::assert_eq;
use serde_json::json;
use tinkerbridge_graphson::predicates::geo::{self, Unit};
use tinkerbridge_graphson::predicates::search;
use tinkerbridge_graphson::value::EnumValue;
use tinkerbridge_graphson::{
    query_from_batch, query_from_traversal, writer_for, Bytecode, GraphSonError, GraphValue,
    GRAPHSON_2_0, GRAPHSON_3_0,
};
use uuid::Uuid;

fn g_v() -> Bytecode {
    Bytecode::new().step("V", vec![])
}

#[test]
fn test_graphson2_traversal_rendering() {
    let uuid: Uuid = "9907570a-3ac5-4ec2-8894-9530e0659d83".parse().unwrap();

    let cases: Vec<(Bytecode, &str)> = vec![
        (g_v(), r#"{"@type":"g:Bytecode","@value":{"step":[["V"]]}}"#),
        (
            Bytecode::new()
                .step("addV", vec!["orders".into()])
                .step("property", vec!["uid".into(), uuid.into()]),
            r#"{"@type":"g:Bytecode","@value":{"step":[["addV","orders"],["property","uid",{"@type":"g:UUID","@value":"9907570a-3ac5-4ec2-8894-9530e0659d83"}]]}}"#,
        ),
        (
            Bytecode::new()
                .step("addV", vec!["person".into()])
                .step(
                    "property",
                    vec!["blob".into(), GraphValue::Blob(vec![0x01, 0x01, 0x03])],
                ),
            r#"{"@type":"g:Bytecode","@value":{"step":[["addV","person"],["property","blob",{"@type":"dse:Blob","@value":"AQED"}]]}}"#,
        ),
        (
            g_v()
                .step("hasLabel", vec!["person".into()])
                .step("has", vec!["age".into()])
                .step("order", vec![])
                .step(
                    "by",
                    vec!["age".into(), EnumValue::order("decr").into()],
                ),
            r#"{"@type":"g:Bytecode","@value":{"step":[["V"],["hasLabel","person"],["has","age"],["order"],["by","age",{"@type":"g:Order","@value":"decr"}]]}}"#,
        ),
        (
            g_v().step(
                "has",
                vec![
                    "user".into(),
                    "description".into(),
                    search::token("whatever").into(),
                ],
            ),
            r#"{"@type":"g:Bytecode","@value":{"step":[["V"],["has","user","description",{"@type":"dse:P","@value":{"predicate":"token","predicateType":"P","value":"whatever"}}]]}}"#,
        ),
        (
            g_v()
                .step(
                    "has",
                    vec![
                        "user".into(),
                        "description".into(),
                        geo::inside(Point::new(-92.0, 44.0), 2.0, Unit::Degrees)
                            .unwrap()
                            .into(),
                    ],
                )
                .step("values", vec!["full_name".into()]),
            r#"{"@type":"g:Bytecode","@value":{"step":[["V"],["has","user","description",{"@type":"dse:P","@value":{"predicate":"inside","predicateType":"Geo","value":{"@type":"dse:Distance","@value":"DISTANCE((-92 44) 2)"}}}],["values","full_name"]]}}"#,
        ),
        (
            g_v()
                .step(
                    "has",
                    vec![
                        "user".into(),
                        "description".into(),
                        search::phrase("a cold", 2).into(),
                    ],
                )
                .step("values", vec!["full_name".into()]),
            r#"{"@type":"g:Bytecode","@value":{"step":[["V"],["has","user","description",{"@type":"g:P","@value":{"predicate":"phrase","value":{"distance":2,"query":"a cold"}}}],["values","full_name"]]}}"#,
        ),
    ];

    for (traversal, expected) in cases {
        assert_eq!(query_from_traversal(&traversal, None).unwrap(), expected);
        // The explicit protocol literal renders identically.
        assert_eq!(
            query_from_traversal(&traversal, Some(GRAPHSON_2_0)).unwrap(),
            expected
        );
    }
}

#[test]
fn test_nested_traversal_with_polygon_predicate() {
    let area = polygon![
        (x: -82.0, y: 40.0),
        (x: -92.5, y: 45.0),
        (x: -95.0, y: 38.0),
        (x: -82.0, y: 40.0),
    ];
    let local = Bytecode::new().step(
        "has",
        vec!["coordinates".into(), geo::inside_polygon(area).into()],
    );
    let traversal = g_v()
        .step(
            "has",
            vec![
                "user".into(),
                "coordinates".into(),
                geo::inside(Point::new(-91.2, 43.8), 10.0, Unit::Degrees)
                    .unwrap()
                    .into(),
            ],
        )
        .step("local", vec![GraphValue::Bytecode(local)])
        .step("values", vec!["full_name".into()]);

    assert_eq!(
        query_from_traversal(&traversal, None).unwrap(),
        r#"{"@type":"g:Bytecode","@value":{"step":[["V"],["has","user","coordinates",{"@type":"dse:P","@value":{"predicate":"inside","predicateType":"Geo","value":{"@type":"dse:Distance","@value":"DISTANCE((-91.2 43.8) 10)"}}}],["local",{"@type":"g:Bytecode","@value":{"step":[["has","coordinates",{"@type":"dse:P","@value":{"predicate":"insideCartesian","predicateType":"Geo","value":{"@type":"dse:Polygon","@value":"POLYGON ((-82 40, -92.5 45, -95 38, -82 40))"}}}]]}}],["values","full_name"]]}}"#
    );
}

#[test]
fn test_graphson3_traversal_rendering() {
    let uuid: Uuid = "9907570a-3ac5-4ec2-8894-9530e0659d83".parse().unwrap();
    assert_eq!(
        query_from_traversal(&g_v(), Some(GRAPHSON_3_0)).unwrap(),
        r#"{"@type":"g:Bytecode","@value":{"step":[["V"]]}}"#
    );
    assert_eq!(
        query_from_traversal(
            &Bytecode::new()
                .step("addV", vec!["orders".into()])
                .step("property", vec!["uid".into(), uuid.into()]),
            Some(GRAPHSON_3_0)
        )
        .unwrap(),
        r#"{"@type":"g:Bytecode","@value":{"step":[["addV","orders"],["property","uid",{"@type":"g:UUID","@value":"9907570a-3ac5-4ec2-8894-9530e0659d83"}]]}}"#
    );
}

#[test]
fn test_unsupported_protocol_is_rejected_by_rendering() {
    let err = query_from_traversal(&g_v(), Some("abc")).unwrap_err();
    assert_eq!(err.to_string(), "Protocol 'abc' not supported");
}

#[test]
fn test_batch_rendering_graphson2() {
    let batch = vec![
        Bytecode::new()
            .step("addV", vec!["person".into()])
            .step("property", vec!["name".into(), "Matt".into()])
            .step("property", vec!["age".into(), 12.into()]),
        Bytecode::new()
            .step("addV", vec!["person".into()])
            .step("property", vec!["name".into(), "Olivia".into()])
            .step("property", vec!["age".into(), 8.into()]),
    ];

    assert_eq!(
        query_from_batch(&batch, None).unwrap(),
        r#"[{"@type":"g:Bytecode","@value":{"step":[["addV","person"],["property","name","Matt"],["property","age",12]]}},{"@type":"g:Bytecode","@value":{"step":[["addV","person"],["property","name","Olivia"],["property","age",8]]}}]"#
    );
}

#[test]
fn test_batch_rendering_graphson3_is_list_tagged() {
    assert_eq!(
        query_from_batch(&[g_v()], Some(GRAPHSON_3_0)).unwrap(),
        r#"{"@type":"g:List","@value":[{"@type":"g:Bytecode","@value":{"step":[["V"]]}}]}"#
    );
}

#[test]
fn test_batch_preserves_submission_order() {
    let batch = vec![
        Bytecode::new().step("addV", vec!["a".into()]),
        Bytecode::new().step("addV", vec!["b".into()]),
    ];
    let query = query_from_batch(&batch, None).unwrap();
    let a = query.find(r#"["addV","a"]"#).unwrap();
    let b = query.find(r#"["addV","b"]"#).unwrap();
    assert!(a < b);
}

#[test]
fn test_empty_batch_is_rejected() {
    assert!(matches!(
        query_from_batch(&[], None),
        Err(GraphSonError::EmptyBatch)
    ));
}

#[test]
fn test_geo_predicate_wire_shape() {
    let predicate = geo::inside(Point::new(-92.0, 44.0), 2.0, Unit::Degrees).unwrap();
    let adapted = writer_for(None)
        .adapt(&GraphValue::GeoPredicate(predicate))
        .unwrap();
    assert_eq!(
        adapted,
        json!({
            "@type": "dse:P",
            "@value": {
                "predicate": "inside",
                "predicateType": "Geo",
                "value": {"@type": "dse:Distance", "@value": "DISTANCE((-92 44) 2)"}
            }
        })
    );
}

#[test]
fn test_kilometer_radius_matches_degree_radius() {
    let km = geo::inside(Point::new(-92.0, 44.0), 400.0, Unit::Kilometers).unwrap();
    let deg = geo::inside(
        Point::new(-92.0, 44.0),
        Unit::Kilometers.to_degrees(400.0),
        Unit::Degrees,
    )
    .unwrap();

    let radius = |p: &tinkerbridge_graphson::predicates::geo::GeoPredicate| match p.value.as_ref() {
        GraphValue::Distance(d) => d.radius(),
        other => panic!("expected distance operand, got {other:?}"),
    };
    assert!((radius(&km) - radius(&deg)).abs() < 1e-9);
}
