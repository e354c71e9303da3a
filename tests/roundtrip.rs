use tagson::*;

#[derive(Debug, Clone, PartialEq)]
struct Pair {
    a: i64,
    b: i64,
}
impl_mapped!(Pair, "demo.Pair", a, b);

#[derive(Debug, Clone, PartialEq)]
struct Part {
    sku: String,
    qty: u32,
}
impl_mapped!(Part, "inv.Part", sku, qty);

#[derive(Debug, Clone, PartialEq)]
struct Assembly {
    name: String,
    part: Part,
}
impl_mapped!(Assembly, "inv.Assembly", name, part);

#[derive(Debug, Clone, PartialEq)]
struct Temperature {
    celsius: f64,
}
impl_mapped!(Temperature, "lab.Temperature", celsius);

fn temperature_mapper() -> CustomMapper<Temperature> {
    CustomMapper::new("lab.Temperature")
        .serialize(|t: &Temperature| {
            let mut fields = Fields::new();
            fields.insert("millikelvin", ((t.celsius + 273.15) * 1000.0).round() as i64);
            fields
        })
        .deserialize(|mut fields| {
            let mk: i64 = FromValue::from_value(
                fields
                    .remove("millikelvin")
                    .ok_or_else(|| ConstructionError::MissingField("millikelvin".into()))?,
            )?;
            Ok(Temperature {
                celsius: mk as f64 / 1000.0 - 273.15,
            })
        })
}

#[test]
fn tag_placement_is_fields_then_meta() {
    let mut registry = MapperRegistry::new();
    let json = to_json(&Value::new_obj(Pair { a: 1, b: 2 }), &mut registry).unwrap();
    assert_eq!(json, r#"{"a": 1, "b": 2, "__meta": "demo.Pair"}"#);
}

#[test]
fn default_mapped_round_trip() {
    let mut registry = MapperRegistry::new();
    let pair = Pair { a: 1, b: 2 };

    let json = to_json(&Value::new_obj(pair.clone()), &mut registry).unwrap();
    let value = from_json(&json, &registry).unwrap();

    assert_eq!(value.obj::<Pair>(), Some(&pair));
}

#[test]
fn first_encode_registers_the_decoder() {
    let mut registry = MapperRegistry::new();
    assert!(!registry.contains("demo.Pair"));

    to_json(&Value::new_obj(Pair { a: 0, b: 0 }), &mut registry).unwrap();

    assert!(registry.contains("demo.Pair"));
    assert!(registry.decoder("demo.Pair").is_some());
}

#[test]
fn nested_objects_tag_each_level() {
    let mut registry = MapperRegistry::new();
    let assembly = Assembly {
        name: "gearbox".into(),
        part: Part {
            sku: "G-100".into(),
            qty: 4,
        },
    };

    let json = to_json(&Value::new_obj(assembly.clone()), &mut registry).unwrap();
    assert_eq!(
        json,
        r#"{"name": "gearbox", "part": {"sku": "G-100", "qty": 4, "__meta": "inv.Part"}, "__meta": "inv.Assembly"}"#
    );

    // the outer decoder receives the inner instance already reconstructed
    let value = from_json(&json, &registry).unwrap();
    assert_eq!(value.obj::<Assembly>(), Some(&assembly));
}

#[test]
fn sequences_tag_each_element() {
    let mut registry = MapperRegistry::new();
    let parts = vec![
        Part {
            sku: "A-1".into(),
            qty: 1,
        },
        Part {
            sku: "B-2".into(),
            qty: 2,
        },
    ];

    let json = to_json(&parts.clone().into_value(), &mut registry).unwrap();
    assert_eq!(
        json,
        r#"[{"sku": "A-1", "qty": 1, "__meta": "inv.Part"}, {"sku": "B-2", "qty": 2, "__meta": "inv.Part"}]"#
    );

    let value = from_json(&json, &registry).unwrap();
    let decoded: Vec<Part> = FromValue::from_value(value).unwrap();
    assert_eq!(decoded, parts);
}

#[test]
fn maps_of_objects_round_trip() {
    let mut registry = MapperRegistry::new();
    let mut fields = Fields::new();
    fields.insert(
        "first",
        Part {
            sku: "A-1".into(),
            qty: 1,
        },
    );
    fields.insert("count", 1);

    let json = to_json(&Value::Map(fields), &mut registry).unwrap();
    assert_eq!(
        json,
        r#"{"first": {"sku": "A-1", "qty": 1, "__meta": "inv.Part"}, "count": 1}"#
    );

    let value = from_json(&json, &registry).unwrap();
    let fields = value.fields().unwrap();
    assert_eq!(
        fields.get("first").unwrap().obj::<Part>(),
        Some(&Part {
            sku: "A-1".into(),
            qty: 1
        })
    );
}

#[test]
fn custom_mapper_round_trip() {
    let mut registry = MapperRegistry::new();
    assert_eq!(temperature_mapper().declare(&mut registry), Ok(true));

    let temp = Temperature { celsius: 21.5 };
    let json = to_json(&Value::new_obj(temp.clone()), &mut registry).unwrap();
    assert_eq!(
        json,
        r#"{"millikelvin": 294650, "__meta": "lab.Temperature"}"#
    );

    let value = from_json(&json, &registry).unwrap();
    let decoded = value.obj::<Temperature>().unwrap();
    assert!((decoded.celsius - temp.celsius).abs() < 1e-9);
}

#[test]
fn first_registration_wins_over_later_custom() {
    let mut registry = MapperRegistry::new();

    // the default mapper self-registers on first encode
    to_json(&Value::new_obj(Temperature { celsius: 0.0 }), &mut registry).unwrap();

    // a custom declaration arriving afterwards is silently kept out
    assert_eq!(temperature_mapper().declare(&mut registry), Ok(false));

    let json = to_json(&Value::new_obj(Temperature { celsius: 0.0 }), &mut registry).unwrap();
    assert_eq!(json, r#"{"celsius": 0.0, "__meta": "lab.Temperature"}"#);
}

#[test]
fn custom_declaration_beats_later_default() {
    let mut registry = MapperRegistry::new();
    temperature_mapper().declare(&mut registry).unwrap();

    // the default path sees an existing mapper and leaves it alone
    let json = to_json(&Value::new_obj(Temperature { celsius: 0.0 }), &mut registry).unwrap();
    assert_eq!(json, r#"{"millikelvin": 273150, "__meta": "lab.Temperature"}"#);
}

#[test]
fn half_declared_mapper_is_rejected() {
    let mut registry = MapperRegistry::new();

    let r = CustomMapper::<Temperature>::new("lab.Temperature")
        .serialize(|t: &Temperature| {
            let mut fields = Fields::new();
            fields.insert("celsius", t.celsius);
            fields
        })
        .declare(&mut registry);
    assert_eq!(
        r,
        Err(MapperContractError::MissingDeserialize("lab.Temperature".into()))
    );

    let r = CustomMapper::<Temperature>::new("lab.Temperature")
        .deserialize(|_| Ok(Temperature { celsius: 0.0 }))
        .declare(&mut registry);
    assert_eq!(
        r,
        Err(MapperContractError::MissingSerialize("lab.Temperature".into()))
    );

    // a failed declaration must not touch the registry
    assert!(!registry.contains("lab.Temperature"));
}

#[test]
fn unregistered_tag_falls_back_to_a_map() {
    let registry = MapperRegistry::new();
    let json = r#"{"a": 1, "b": 2, "__meta": "ext.Unknown"}"#;

    let value = from_json(json, &registry).unwrap();
    let fields = value.fields().unwrap();
    assert_eq!(fields.get("a"), Some(&Value::new_num(1)));
    assert_eq!(fields.get("__meta"), Some(&Value::new_str("ext.Unknown")));

    // and the fallback map re-encodes byte for byte
    let mut registry = MapperRegistry::new();
    assert_eq!(to_json(&value, &mut registry).unwrap(), json);
}

#[test]
fn missing_field_fails_construction() {
    let mut registry = MapperRegistry::new();
    to_json(&Value::new_obj(Pair { a: 0, b: 0 }), &mut registry).unwrap();

    let r = from_json(r#"{"a": 1, "__meta": "demo.Pair"}"#, &registry);
    assert_eq!(
        r,
        Err(DecodeError::Construction(ConstructionError::MissingField(
            "b".into()
        )))
    );
}

#[test]
fn field_kind_mismatch_fails_construction() {
    let mut registry = MapperRegistry::new();
    to_json(&Value::new_obj(Pair { a: 0, b: 0 }), &mut registry).unwrap();

    let r = from_json(r#"{"a": 1, "b": "two", "__meta": "demo.Pair"}"#, &registry);
    assert!(matches!(
        r,
        Err(DecodeError::Construction(ConstructionError::Mismatch { .. }))
    ));
}

#[test]
fn malformed_text_fails_before_decoding() {
    let registry = MapperRegistry::new();
    let r = from_json(r#"{"a": 1,"#, &registry);
    assert!(matches!(r, Err(DecodeError::Parse(_))));
}

#[test]
fn shared_registry_across_threads() {
    let shared = SharedRegistry::new();

    let encoder = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            to_json(
                &Value::new_obj(Pair { a: 7, b: 9 }),
                &mut shared.write(),
            )
            .unwrap()
        })
    };
    let json = encoder.join().unwrap();

    let decoder = {
        let shared = shared.clone();
        std::thread::spawn(move || {
            let registry = shared.read();
            let value = from_json(&json, &registry).unwrap();
            value.obj::<Pair>().cloned()
        })
    };

    assert_eq!(decoder.join().unwrap(), Some(Pair { a: 7, b: 9 }));
}

#[test]
fn primitives_pass_through_untagged() {
    let mut registry = MapperRegistry::new();
    let value = Value::new_map(vec![
        ("id".to_string(), Value::new_num(7)),
        ("label".to_string(), Value::new_str("seven")),
        ("active".to_string(), Value::Bool(true)),
        ("notes".to_string(), Value::Null),
        (
            "scores".to_string(),
            Value::Seq(vec![Value::new_num(1.5), Value::new_num(-2)]),
        ),
    ]);

    let json = to_json(&value, &mut registry).unwrap();
    assert_eq!(
        json,
        r#"{"id": 7, "label": "seven", "active": true, "notes": null, "scores": [1.5, -2]}"#
    );
    assert!(registry.is_empty());

    assert_eq!(from_json(&json, &registry).unwrap(), value);
}
