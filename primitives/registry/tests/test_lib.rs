use ir::{EnumValue, Enumeration, Model, ModelField, Service, ServiceMethod};
use registry::{ApiContext, ApiContextBuilder, ApiContextReader, RegistryError};

/// Helper function to create a test service with a single unary method
fn create_test_service(name: &str, input: &str, output: &str) -> Service {
    Service::new(name, "svc").with_method(ServiceMethod::new("Call", input, output))
}

#[test]
fn test_api_context_empty() {
    let ctx = ApiContextBuilder::new().build();

    assert!(ctx.is_empty());
    assert_eq!(ctx.len(), 0);
    assert!(ctx.models().is_empty());
    assert!(ctx.services().is_empty());
    assert!(ctx.lookup("nonexistent").is_none());
}

#[test]
fn test_add_model_preserves_order() {
    let mut builder = ApiContext::builder();
    let zebra = builder.add_model(Model::new("svc.Zebra")).expect("Zebra should register");
    let apple = builder.add_model(Model::new("svc.Apple")).expect("Apple should register");
    assert_eq!(builder.model_count(), 2);

    let ctx = builder.build();
    let names: Vec<&str> = ctx.models().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["svc.Zebra", "svc.Apple"]);
    assert_eq!(zebra.index(), 0);
    assert_eq!(apple.index(), 1);
    assert_eq!(ctx.model(apple).name, "svc.Apple");
    assert_eq!(ctx.model_id("svc.Zebra"), Some(zebra));
}

#[test]
fn test_lookup() {
    let mut builder = ApiContextBuilder::new();
    builder
        .add_model(Model::new("svc.Bar").with_field(ModelField::message("nested", "svc.Nested")))
        .expect("Bar should register");
    let ctx = builder.build();

    let bar = ctx.lookup("svc.Bar").expect("Bar should be found");
    assert_eq!(bar.fields.len(), 1);
    // Field references are not registered implicitly
    assert!(ctx.lookup("svc.Nested").is_none());
    assert!(ctx.lookup("int32").is_none());
}

#[test]
fn test_duplicate_model_is_rejected() {
    let mut builder = ApiContextBuilder::new();
    builder.add_model(Model::new("svc.Hat")).expect("first Hat should register");

    let err = builder
        .add_model(Model::new("svc.Hat").with_field(ModelField::message("x", "svc.X")))
        .expect_err("second Hat should be rejected");
    assert_eq!(err, RegistryError::DuplicateModel("svc.Hat".into()));

    // The original registration is kept untouched
    let ctx = builder.build();
    assert_eq!(ctx.len(), 1);
    assert!(ctx.lookup("svc.Hat").expect("Hat").fields.is_empty());
}

#[test]
fn test_services() {
    let mut builder = ApiContextBuilder::new();
    builder.add_service(create_test_service("Haberdasher", "svc.Size", "svc.Hat")).expect("ok");
    builder.add_service(create_test_service("Tailor", "svc.Size", "svc.Suit")).expect("ok");

    let err = builder
        .add_service(create_test_service("Tailor", "svc.A", "svc.B"))
        .expect_err("duplicate service should be rejected");
    assert_eq!(err.to_string(), "duplicate service: svc.Tailor");

    let ctx = builder.build();
    assert_eq!(ctx.services().len(), 2);
    let tailor = ctx.service("svc.Tailor").expect("Tailor should be found");
    assert_eq!(tailor.methods[0].output_type, "svc.Suit");
    assert!(ctx.service("Tailor").is_none());
}

#[test]
fn test_enums() {
    let mut builder = ApiContextBuilder::new();
    let color = Enumeration {
        name: "svc.Color".into(),
        package: "svc".into(),
        values: vec![EnumValue { name: "RED".into(), number: 0 }],
    };
    builder.add_enum(color.clone()).expect("Color should register");
    assert_eq!(builder.add_enum(color), Err(RegistryError::DuplicateEnum("svc.Color".into())));

    let ctx = builder.build();
    assert_eq!(ctx.enums().len(), 1);
    assert_eq!(ctx.enumeration("svc.Color").expect("Color").values[0].name, "RED");
    // Enumerations are not models
    assert!(ctx.lookup("svc.Color").is_none());
}

#[test]
fn test_flags_need_every_file() {
    // Two "files" worth of registrations; the method using Outer lives in the second
    let mut builder = ApiContextBuilder::new();
    builder
        .add_model(Model::new("a.Outer").with_field(ModelField::message("inner", "a.Inner")))
        .expect("ok");
    builder.add_model(Model::new("a.Inner")).expect("ok");
    builder.add_model(Model::new("b.Reply")).expect("ok");
    builder
        .add_service(Service::new("Api", "b").with_method(ServiceMethod::new("Send", "a.Outer", "b.Reply")))
        .expect("ok");

    let mut ctx = builder.build();
    ctx.apply_marshal_flags();

    assert!(ctx.lookup("a.Outer").expect("Outer").can_marshal);
    assert!(ctx.lookup("a.Inner").expect("Inner").can_marshal);
    assert!(ctx.lookup("b.Reply").expect("Reply").can_unmarshal);
}
