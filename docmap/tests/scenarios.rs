use docmap::prelude::*;

fn label() -> Schema {
    Schema::builder("Label")
        .identifier(IdentifierPolicy::None)
        .field_with_default("name", TypeTag::String, DefaultValue::literal("warning"))
        .field_with_default("color", TypeTag::String, DefaultValue::literal("red"))
        .build()
        .unwrap()
}

fn card(label: &Schema) -> Schema {
    Schema::builder("Card")
        .identifier(IdentifierPolicy::None)
        .field("title", TypeTag::String)
        .embeds_one_with_default("label", label, DefaultValue::instance_of(label))
        .build()
        .unwrap()
}

fn doc<const N: usize>(entries: [(&str, Value); N]) -> Document {
    entries.into_iter().collect()
}

#[test]
fn new_card_has_default_label() {
    let label = label();
    let card = card(&label);

    let record = card.new_record();

    assert_eq!(record.value("title"), &Value::Null);
    let nested = record.value("label").as_record().unwrap();
    assert_eq!(nested.schema_name(), "Label");
    assert_eq!(nested.value("name"), &Value::from("warning"));
    assert_eq!(nested.value("color"), &Value::from("red"));
}

#[test]
fn dumping_a_new_card_omits_the_title() {
    let label = label();
    let card = card(&label);

    let dumped = card.dump(card.new_record());

    let expected = doc([(
        "label",
        Value::Map(doc([("name", Value::from("warning")), ("color", Value::from("red"))])),
    )]);
    assert_eq!(dumped, expected);
}

#[test]
fn loading_never_reapplies_defaults() {
    let label = label();
    let card = card(&label);

    let record = card.load(&doc([("title", Value::from("X"))]));

    assert_eq!(record.value("title"), &Value::from("X"));
    assert_eq!(record.value("label"), &Value::Null);
}

#[test]
fn null_embedded_single_loads_as_null() {
    let label = label();
    let card = card(&label);

    let record = card.load(&doc([("label", Value::Null)]));
    assert_eq!(record.value("label"), &Value::Null);
}

#[test]
fn loading_null_yields_the_absence_marker() {
    let label = label();
    let card = card(&label);

    for schema in [&label, &card] {
        assert_eq!(schema.load_value(&Value::Null, KeyMode::Textual), Value::Null);
        assert_eq!(schema.load_value(&Value::Null, KeyMode::Symbolic), Value::Null);
    }
}

#[test]
fn loading_a_list_of_documents() {
    let label = label();
    let card = card(&label);
    let list = Value::Array(vec![
        Value::Map(doc([("title", Value::from("a"))])),
        Value::Map(doc([("title", Value::from("b"))])),
    ]);

    let loaded = card.load_value(&list, KeyMode::Textual);

    let titles: Vec<_> = loaded
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item.as_record().unwrap().value("title").clone())
        .collect();
    assert_eq!(titles, [Value::from("a"), Value::from("b")]);
}

#[test]
fn default_identifiers_are_fresh_and_dumped() {
    let thing = Schema::builder("Thing")
        .field("name", TypeTag::String)
        .build()
        .unwrap();

    let first = thing.new_record();
    let second = thing.new_record();
    let id = first.id().cloned().unwrap();
    assert!(matches!(id, Value::ObjectId(_)));
    assert_ne!(Some(&id), second.id());

    let dumped = thing.dump(first);
    assert_eq!(dumped.get_str("_id"), Some(&id));
}

#[test]
fn identifier_survives_a_load_dump_cycle() {
    let thing = Schema::builder("Thing").build().unwrap();
    let dumped = thing.dump(thing.new_record());

    let reloaded = thing.load(&dumped);
    assert_eq!(reloaded.id(), dumped.get_str("_id"));
    assert_eq!(thing.dump(reloaded), dumped);
}

#[test]
fn pre_dump_hook_keeps_derived_fields_out() {
    let schema = Schema::builder("Invoice")
        .identifier(IdentifierPolicy::None)
        .field("net", TypeTag::Int)
        .field("derived", TypeTag::Int)
        .post_load(|mut record| {
            let gross = record.value("net").as_i64().map(|net| net * 2);
            record.set("derived", gross).ok();
            record
        })
        .pre_dump(|mut record| {
            record.take("derived");
            record
        })
        .build()
        .unwrap();

    let loaded = schema.load(&doc([("net", Value::from(10)), ("derived", Value::from(1))]));
    assert_eq!(loaded.value("derived"), &Value::Int(20));

    for derived in [Value::Null, Value::from(5), Value::from("text")] {
        let record = schema.new_record().with("net", 1).unwrap().with("derived", derived).unwrap();
        let dumped = schema.dump(record);
        assert!(dumped.get_str("derived").is_none());
        assert_eq!(dumped.get_str("net"), Some(&Value::Int32(1)));
    }
}

#[test]
fn nested_collections_of_embedded_records() {
    let comment = Schema::builder("Comment")
        .identifier(IdentifierPolicy::None)
        .field("body", TypeTag::String)
        .field("author", TypeTag::String)
        .build()
        .unwrap();
    let post = Schema::builder("Post")
        .field("title", TypeTag::String)
        .embeds_many_with_default("comments", &comment, DefaultValue::literal(Value::Array(Vec::new())))
        .build()
        .unwrap();

    let fresh = post.new_record();
    assert_eq!(fresh.value("comments"), &Value::Array(Vec::new()));

    let source = doc([
        ("title", Value::from("Hello")),
        (
            "comments",
            Value::Array(vec![
                Value::Map(doc([("body", Value::from("first")), ("author", Value::Null)])),
                Value::Map(doc([("body", Value::from("second")), ("author", Value::from("ann"))])),
            ]),
        ),
    ]);

    let record = post.load(&source);
    let comments = record.value("comments").as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert!(comments.iter().all(|item| item.as_record().is_some()));

    let dumped = post.dump(record);
    let comments = dumped.get_str("comments").and_then(Value::as_array).unwrap();
    assert_eq!(comments[0], Value::Map(doc([("body", Value::from("first"))])));
    assert_eq!(comments[1].as_document().map(Document::len), Some(2));
}

#[test]
fn missing_embedded_collection_loads_as_null_not_empty() {
    let comment = Schema::builder("Comment")
        .identifier(IdentifierPolicy::None)
        .field("body", TypeTag::String)
        .build()
        .unwrap();
    let post = Schema::builder("Post")
        .identifier(IdentifierPolicy::None)
        .embeds_many_with_default("comments", &comment, DefaultValue::literal(Value::Array(Vec::new())))
        .build()
        .unwrap();

    let record = post.load(&Document::new());
    assert_eq!(record.value("comments"), &Value::Null);
}

#[test]
fn ad_hoc_records_in_plain_fields_are_flattened() {
    let point = Schema::builder("Point")
        .identifier(IdentifierPolicy::None)
        .field("x", TypeTag::Int)
        .field("y", TypeTag::Int)
        .build()
        .unwrap();
    let shape = Schema::builder("Shape")
        .identifier(IdentifierPolicy::None)
        .field("points", TypeTag::Any)
        .build()
        .unwrap();

    let origin = point.new_record().with("x", 0).unwrap();
    let record = shape.new_record().with("points", vec![origin]).unwrap();

    let dumped = shape.dump(record);
    let points = dumped.get_str("points").and_then(Value::as_array).unwrap();
    assert_eq!(points[0], Value::Map(doc([("x", Value::Int32(0))])));
}

#[test]
fn heterogeneous_relations_map_partially() {
    let label = label();
    let schema = Schema::builder("Board")
        .identifier(IdentifierPolicy::None)
        .embeds_one("label", &label)
        .embeds_one("attachment", "Attachment")
        .build()
        .unwrap();
    let source = doc([
        ("label", Value::Map(doc([("name", Value::from("todo"))]))),
        ("attachment", Value::Map(doc([("size", Value::from(3))]))),
    ]);

    let record = schema.load(&source);

    assert!(record.value("label").as_record().is_some());
    assert_eq!(record.value("attachment"), &Value::Null);
}

#[test]
fn a_schema_embeds_itself_by_name() {
    let comment = Schema::builder("Comment")
        .identifier(IdentifierPolicy::None)
        .field("body", TypeTag::String)
        .embeds_many("replies", "Comment")
        .build()
        .unwrap();
    let leaf = doc([("body", Value::from("me too"))]);
    let reply = doc([
        ("body", Value::from("agreed")),
        ("replies", Value::Array(vec![Value::Map(leaf.clone())])),
    ]);
    let source = doc([
        ("body", Value::from("first")),
        ("replies", Value::Array(vec![Value::Map(reply.clone()), Value::Null])),
    ]);

    let record = comment.load(&source);
    let replies = record.value("replies").as_array().unwrap();
    let nested = replies[0].as_record().unwrap();
    assert_eq!(nested.schema_name(), "Comment");
    let deepest = nested.value("replies").as_array().unwrap()[0].as_record().unwrap();
    assert_eq!(deepest.value("body"), &Value::from("me too"));
    assert_eq!(deepest.value("replies"), &Value::Null);
    assert_eq!(replies[1], Value::Null);

    assert_eq!(comment.dump(record), source);
}

#[test]
fn forward_references_stay_unmapped() {
    let registry = SchemaRegistry::builder()
        .register(
            Schema::builder("Thread")
                .identifier(IdentifierPolicy::None)
                .embeds_one("pinned", "Post"),
        )
        .unwrap()
        .register(Schema::builder("Post").identifier(IdentifierPolicy::None).field("body", TypeTag::String))
        .unwrap()
        .build();
    let thread = registry.schema("Thread").unwrap();

    let relation = thread.field("pinned").and_then(Field::relation).unwrap();
    assert_eq!(relation.capabilities(), Capabilities::NONE);
    let record = thread.load(&doc([("pinned", Value::Map(doc([("body", Value::from("hi"))])))]));
    assert_eq!(record.value("pinned"), &Value::Null);
}
