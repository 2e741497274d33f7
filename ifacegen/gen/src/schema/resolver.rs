//! Recursive object-to-schema resolution.

use std::collections::HashSet;

use ifacegen_define::object::{DESC_TAG, EXAMPLE_TAG};
use ifacegen_define::{Node, Object, Service};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tracing::{debug, info, instrument, warn};

use super::builtin::{BINARY_FORMAT, cast_type};
use super::{SchemaNode, SchemaRegistry};
use crate::config::SynthConfig;
use crate::naming::{exchange_field_name, schema_ref};
use crate::signature::{request_params, response_params};

const OBJECT_TYPE: &str = "object";
const ARRAY_TYPE: &str = "array";

/// Builds schema nodes from model objects, registering named struct types
/// in a [`SchemaRegistry`] as it goes.
///
/// A struct type re-entered while its own fields are being resolved is
/// emitted as a `$ref` instead of being expanded again.
#[derive(Debug)]
pub struct SchemaSynthesizer<'r> {
    registry: &'r mut SchemaRegistry,
    in_progress: HashSet<String>,
}

impl<'r> SchemaSynthesizer<'r> {
    pub fn new(registry: &'r mut SchemaRegistry) -> Self {
        Self {
            registry,
            in_progress: HashSet::new(),
        }
    }

    /// Registers every top-level type, then every struct-shaped argument
    /// and result of every service method, each under its type name.
    ///
    /// A top-level declaration keeps its own description and example. A
    /// method parameter is an occurrence and contributes its shape only.
    #[instrument(skip_all, fields(types = node.types.len(), services = node.services.len()))]
    pub fn synthesize(&mut self, node: &Node) {
        for object in &node.types {
            let schema = self.resolve(object);
            self.registry.register(
                object.type_name.clone(),
                SchemaNode {
                    nullable: false,
                    ..schema
                },
            );
        }

        for service in &node.services {
            for method in &service.methods {
                for object in method.arguments.iter().chain(&method.results) {
                    if object.is_struct() {
                        let schema = self.resolve(object);
                        self.register_shape(object.type_name.clone(), &schema);
                    }
                }
            }
        }

        debug!(schemas = self.registry.len(), "model schemas registered");
    }

    /// Registers an object schema for every request and response exchange
    /// type of `service`.
    ///
    /// Struct-shaped members are registered under their own name and
    /// referenced; everything else is inlined.
    #[instrument(skip_all, fields(service = %service.name))]
    pub fn register_exchange_schemas(&mut self, service: &Service, config: &SynthConfig) {
        for method in &service.methods {
            let request = self.exchange_schema(request_params(method, config));
            self.registry.register(config.request_name(&method.name), request);

            let response = self.exchange_schema(response_params(method, config));
            self.registry.register(config.response_name(&method.name), response);
        }
    }

    /// Resolves `object` into a schema node.
    ///
    /// Struct-shaped objects are registered under their schema name as a
    /// side effect unless aliased to `-`.
    #[instrument(level = "trace", skip_all, fields(name = %object.name, type_name = %object.type_name))]
    pub fn resolve(&mut self, object: &Object) -> SchemaNode {
        let mut schema = SchemaNode {
            nullable: object.is_nullable,
            description: object
                .tags
                .value(DESC_TAG)
                .filter(|desc| !desc.is_empty())
                .map(str::to_string),
            ..SchemaNode::default()
        };

        if object.is_any() {
            schema.schema_type = Some(OBJECT_TYPE.to_string());
            schema.example = Some(json_example(object));
            return schema;
        }

        if !object.is_map {
            schema.example = scalar_example(object);
        }

        let (type_name, format) = cast_type(object);

        if object.is_struct() {
            let name = object.schema_name().to_string();
            if self.in_progress.contains(&name) {
                if !object.is_array {
                    return recursive_reference(schema, object, &name);
                }
            } else {
                self.in_progress.insert(name.clone());
                let properties = self.properties(&object.fields);
                self.in_progress.remove(&name);

                schema.schema_type = Some(OBJECT_TYPE.to_string());
                schema.properties = Some(properties);
                if object.registers_schema() {
                    self.register_shape(name, &schema);
                }
            }
        }

        if object.is_array {
            schema.properties = None;
            if format.as_deref() == Some(BINARY_FORMAT) {
                schema.schema_type = Some(type_name);
                schema.format = format;
            } else if object.is_builtin {
                let items = match object.value_type() {
                    Some(element) if element.is_array => self.resolve(element),
                    _ => SchemaNode::typed(type_name, format),
                };
                schema.schema_type = Some(ARRAY_TYPE.to_string());
                schema.items = Some(Box::new(items));
            } else {
                if !object.is_struct()
                    && let Some(element) = object.value_type()
                    && element.is_struct()
                {
                    self.resolve(element);
                }
                schema.schema_type = Some(ARRAY_TYPE.to_string());
                schema.items = Some(Box::new(SchemaNode::reference(&type_name)));
            }
            return schema;
        }

        if object.is_map {
            schema.schema_type = Some(OBJECT_TYPE.to_string());
            schema.additional_properties = self.map_values(object).map(Box::new);
            schema.example = Some(json_example(object));
            return schema;
        }

        if object.is_struct() {
            return schema;
        }

        if let Some(alias) = object.reference_alias() {
            schema.ref_path = Some(schema_ref(alias));
            return schema;
        }

        schema.schema_type = Some(type_name);
        schema.format = format;
        schema
    }

    /// Registers the shape of an occurrence. Description and example of an
    /// earlier declaration under the same name survive.
    fn register_shape(&mut self, name: String, schema: &SchemaNode) {
        let mut shape = shape_of(schema);
        if let Some(declared) = self.registry.get(&name) {
            shape.description.clone_from(&declared.description);
            shape.example.clone_from(&declared.example);
        }
        self.registry.register(name, shape);
    }

    fn properties(&mut self, fields: &[Object]) -> IndexMap<String, SchemaNode> {
        fields
            .iter()
            .filter(|field| !field.is_excluded())
            .map(|field| (field.serialized_name().to_string(), self.resolve(field)))
            .collect()
    }

    fn map_values(&mut self, object: &Object) -> Option<SchemaNode> {
        let Some(value) = object.value_type() else {
            debug!(type_name = %object.type_name, "map without value type");
            return None;
        };

        if value.is_struct() {
            let resolved = self.resolve(value);
            if value.registers_schema() {
                return Some(SchemaNode::reference(value.schema_name()));
            }
            return Some(resolved);
        }

        if let Some(alias) = value.reference_alias() {
            return Some(SchemaNode::reference(alias));
        }

        let (value_type, _) = cast_type(value);
        Some(SchemaNode::typed(value_type, None))
    }

    fn exchange_schema(&mut self, params: &[Object]) -> SchemaNode {
        let properties = params
            .iter()
            .filter(|param| !param.is_excluded())
            .map(|param| {
                let resolved = self.resolve(param);
                let member = if param.is_struct() && !param.is_array && param.registers_schema() {
                    SchemaNode::reference(param.schema_name())
                } else {
                    resolved
                };
                (exchange_field_name(param), member)
            })
            .collect();

        SchemaNode {
            properties: Some(properties),
            ..SchemaNode::typed(OBJECT_TYPE, None)
        }
    }
}

/// Synthesizes the full schema registry for `node`.
///
/// Model types first, then (when enabled) the exchange types of every
/// service.
pub fn build_registry(node: &Node, config: &SynthConfig) -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    let mut synthesizer = SchemaSynthesizer::new(&mut registry);

    synthesizer.synthesize(node);
    if config.exchange_schemas {
        for service in &node.services {
            synthesizer.register_exchange_schemas(service, config);
        }
    }

    info!(schemas = registry.len(), "schema registry built");
    registry
}

/// Registered schemas describe the type, not one occurrence of it, so
/// occurrence nullability, description and example are dropped.
fn shape_of(schema: &SchemaNode) -> SchemaNode {
    SchemaNode {
        nullable: false,
        description: None,
        example: None,
        ..schema.clone()
    }
}

/// Re-entered struct: the occurrence metadata already on `schema` is kept.
fn recursive_reference(mut schema: SchemaNode, object: &Object, name: &str) -> SchemaNode {
    if object.registers_schema() {
        debug!(type_name = name, "recursive type, emitting reference");
        schema.ref_path = Some(schema_ref(name));
    } else {
        warn!(
            type_name = name,
            "recursive type is not registered, emitting an open object"
        );
        schema.schema_type = Some(OBJECT_TYPE.to_string());
    }
    schema
}

/// Example of a scalar, array or struct occurrence. Malformed values are
/// logged and dropped.
fn scalar_example(object: &Object) -> Option<Value> {
    match object.example_value() {
        Ok(example) => example,
        Err(error) => {
            warn!(%error, "malformed example ignored");
            None
        }
    }
}

/// Example of an any or map occurrence: a JSON literal, `{}` when absent
/// or malformed.
fn json_example(object: &Object) -> Value {
    let raw = object.tags.value_or(EXAMPLE_TAG, "{}");
    serde_json::from_str(raw).unwrap_or_else(|error| {
        warn!(type_name = %object.type_name, %error, "malformed example ignored");
        Value::Object(Map::new())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{get_user_method, make_service, user_service_node, user_type};
    use ifacegen_define::Method;
    use serde_json::json;

    fn resolve(object: &Object) -> (Value, SchemaRegistry) {
        let mut registry = SchemaRegistry::new();
        let schema = SchemaSynthesizer::new(&mut registry).resolve(object);
        (serde_json::to_value(schema).unwrap(), registry)
    }

    fn registered(registry: &SchemaRegistry, name: &str) -> Value {
        serde_json::to_value(registry.get(name).unwrap()).unwrap()
    }

    #[test]
    fn get_user_scenario() {
        let registry = build_registry(&user_service_node(), &SynthConfig::default());

        assert_eq!(
            registered(&registry, "User"),
            json!({
                "type": "object",
                "properties": {
                    "Name": {"type": "string"},
                    "CreatedAt": {"type": "string", "format": "date-time"}
                }
            })
        );
        assert_eq!(
            registered(&registry, "GetUserRequest"),
            json!({"type": "object", "properties": {"Id": {"type": "string"}}})
        );
        assert_eq!(
            registered(&registry, "GetUserResponse"),
            json!({
                "type": "object",
                "properties": {"User": {"$ref": "#/components/schemas/User"}}
            })
        );
    }

    #[test]
    fn exchange_schemas_can_be_disabled() {
        let config = SynthConfig {
            exchange_schemas: false,
            ..SynthConfig::default()
        };
        let registry = build_registry(&user_service_node(), &config);

        assert!(registry.contains("User"));
        assert!(!registry.contains("GetUserRequest"));
        assert!(!registry.contains("GetUserResponse"));
    }

    #[test]
    fn empty_methods_get_empty_exchange_schemas() {
        let node = Node {
            types: vec![],
            services: vec![make_service("Health", vec![Method::new("Ping")])],
        };
        let registry = build_registry(&node, &SynthConfig::default());

        assert_eq!(
            registered(&registry, "PingRequest"),
            json!({"type": "object", "properties": {}})
        );
        assert!(registry.contains("PingResponse"));
    }

    #[test]
    fn any_type_is_an_open_object() {
        let (schema, _) = resolve(&Object::new("payload", "Interface"));
        assert_eq!(schema, json!({"type": "object", "example": {}}));

        let tagged = Object::new("payload", "interface{}").with_tag("example", r#"{"a": 1}"#);
        let (schema, _) = resolve(&tagged);
        assert_eq!(schema, json!({"type": "object", "example": {"a": 1}}));
    }

    #[test]
    #[tracing_test::traced_test]
    fn malformed_any_example_is_logged_and_dropped() {
        let payload = Object::new("payload", "Interface").with_tag("example", "{oops");
        let (schema, _) = resolve(&payload);

        assert_eq!(schema, json!({"type": "object", "example": {}}));
        assert!(logs_contain("malformed example ignored"));
    }

    #[test]
    #[tracing_test::traced_test]
    fn malformed_scalar_example_is_logged_and_dropped() {
        let count = Object::builtin("count", "int64").with_tag("example", "many");
        let (schema, _) = resolve(&count);

        assert_eq!(schema, json!({"type": "number"}));
        assert!(logs_contain("malformed example ignored"));
    }

    #[test]
    fn metadata_is_passed_through() {
        let id = Object::builtin("id", "uuid.UUID")
            .nullable()
            .with_tag("desc", "Unique identifier")
            .with_tag("example", "9b2f0f5e-3c1a-4d59-8f0e-6a4c1f0d2b7e");
        let (schema, _) = resolve(&id);

        assert_eq!(
            schema,
            json!({
                "type": "string",
                "format": "uuid",
                "nullable": true,
                "description": "Unique identifier",
                "example": "9b2f0f5e-3c1a-4d59-8f0e-6a4c1f0d2b7e"
            })
        );

        let (limit, _) = resolve(&Object::builtin("limit", "int").with_tag("example", "25"));
        assert_eq!(limit, json!({"type": "number", "example": 25}));
    }

    #[test]
    fn struct_fields_honor_serialization_rules() {
        let account = Object::new("", "Account").with_fields(vec![
            Object::builtin("ID", "string").with_type_tag("json", &["id"]),
            Object::builtin("password", "string").private(),
            Object::builtin("Internal", "bool").with_type_tag("json", &["-"]),
            Object::builtin("Balance", "float64"),
        ]);
        let (schema, registry) = resolve(&account);

        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "id": {"type": "string"},
                    "Balance": {"type": "number", "format": "float"}
                }
            })
        );
        assert_eq!(registered(&registry, "Account"), schema);
    }

    #[test]
    fn nested_structs_are_inlined_and_registered() {
        let buyer = Object {
            name: "Buyer".to_string(),
            ..user_type()
        }
        .with_tag("desc", "Placed the order");
        let order = Object::new("", "Order")
            .with_fields(vec![Object::builtin("Total", "float64"), buyer.nullable()]);
        let (schema, registry) = resolve(&order);

        let inlined = &schema["properties"]["Buyer"];
        assert_eq!(inlined["nullable"], true);
        assert_eq!(inlined["properties"], registered(&registry, "User")["properties"]);
        assert_eq!(inlined["description"], "Placed the order");
        assert!(registered(&registry, "User").get("nullable").is_none());
        assert!(registered(&registry, "User").get("description").is_none());
        assert!(registry.contains("Order"));
    }

    #[test]
    fn suppressed_alias_inlines_without_registering() {
        let inline = Object::new("meta", "Meta")
            .with_alias("-")
            .with_fields(vec![Object::builtin("Version", "int")]);
        let (schema, registry) = resolve(&inline);

        assert_eq!(
            schema,
            json!({"type": "object", "properties": {"Version": {"type": "number"}}})
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn leaf_alias_becomes_reference() {
        let id = Object::new("owner", "OwnerID").with_alias("UserID");
        let (schema, _) = resolve(&id);
        assert_eq!(schema, json!({"$ref": "#/components/schemas/UserID"}));
    }

    #[test]
    fn unknown_leaf_keeps_declared_name() {
        let (schema, _) = resolve(&Object::new("status", "Status"));
        assert_eq!(schema, json!({"type": "Status"}));
    }

    #[test]
    fn byte_arrays_collapse_to_binary_strings() {
        let data = Object::array_of("data", Object::builtin("", "byte"));
        let (schema, _) = resolve(&data);
        assert_eq!(schema, json!({"type": "string", "format": "binary"}));
    }

    #[test]
    fn arrays_of_byte_arrays_keep_their_items() {
        let blobs = Object::array_of("blobs", Object::array_of("", Object::builtin("", "byte")));
        let (schema, _) = resolve(&blobs);
        assert_eq!(
            schema,
            json!({"type": "array", "items": {"type": "string", "format": "binary"}})
        );
    }

    #[test]
    fn builtin_arrays_carry_item_types() {
        let stamps = Object::array_of("stamps", Object::builtin("", "time.Time"));
        let (schema, _) = resolve(&stamps);
        assert_eq!(
            schema,
            json!({"type": "array", "items": {"type": "string", "format": "date-time"}})
        );
    }

    #[test]
    fn user_type_arrays_reference_their_element() {
        let users = Object::array_of("users", user_type());
        let (schema, registry) = resolve(&users);

        assert_eq!(
            schema,
            json!({"type": "array", "items": {"$ref": "#/components/schemas/User"}})
        );
        assert!(registry.contains("User"));
    }

    #[test]
    fn struct_shaped_arrays_register_their_element_name() {
        let mut users = Object::array_of("users", Object::new("", "User"));
        users.fields = user_type().fields;
        let (schema, registry) = resolve(&users);

        assert_eq!(schema["type"], "array");
        assert!(schema.get("properties").is_none());
        assert_eq!(registered(&registry, "User")["type"], "object");
    }

    #[test]
    fn maps_describe_their_values() {
        let by_id = Object::map_of("byId", Object::builtin("", "string"), user_type());
        let (schema, registry) = resolve(&by_id);
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "example": {},
                "additionalProperties": {"$ref": "#/components/schemas/User"}
            })
        );
        assert!(registry.contains("User"));

        let aliased = Object::map_of(
            "owners",
            Object::builtin("", "string"),
            Object::new("", "OwnerID").with_alias("UserID"),
        );
        let (schema, _) = resolve(&aliased);
        assert_eq!(
            schema["additionalProperties"],
            json!({"$ref": "#/components/schemas/UserID"})
        );

        let counts = Object::map_of(
            "counts",
            Object::builtin("", "string"),
            Object::builtin("", "int64"),
        )
        .with_tag("example", r#"{"a": 1}"#);
        let (schema, _) = resolve(&counts);
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "example": {"a": 1},
                "additionalProperties": {"type": "number"}
            })
        );
    }

    #[test]
    fn self_referential_types_terminate() {
        let employee = Object::new("", "Employee").with_fields(vec![
            Object::builtin("Name", "string"),
            Object::new("Manager", "Employee")
                .nullable()
                .with_tag("desc", "Reports to")
                .with_fields(vec![Object::builtin("Name", "string")]),
        ]);
        let (schema, registry) = resolve(&employee);

        assert_eq!(
            schema["properties"]["Manager"],
            json!({
                "$ref": "#/components/schemas/Employee",
                "nullable": true,
                "description": "Reports to"
            })
        );
        assert_eq!(registered(&registry, "Employee"), schema);
    }

    #[test]
    fn driver_registers_only_struct_shaped_parameters() {
        let method = Method::new("Create")
            .with_arguments(vec![
                Object::new("ctx", "context.Context"),
                Object::builtin("name", "string"),
                Object::new("opts", "CreateOptions")
                    .with_fields(vec![Object::builtin("DryRun", "bool")]),
            ])
            .with_results(vec![Object::builtin("id", "int64"), Object::new("err", "error")]);
        let node = Node {
            types: vec![],
            services: vec![make_service("Items", vec![method])],
        };

        let mut registry = SchemaRegistry::new();
        SchemaSynthesizer::new(&mut registry).synthesize(&node);

        let names: Vec<&String> = registry.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["CreateOptions"]);
    }

    #[test]
    fn suppressed_top_level_types_are_still_registered() {
        let node = Node {
            types: vec![
                user_type(),
                Object::new("", "Hidden")
                    .with_alias("-")
                    .with_fields(vec![Object::builtin("X", "int")]),
            ],
            services: vec![],
        };

        let mut registry = SchemaRegistry::new();
        SchemaSynthesizer::new(&mut registry).synthesize(&node);

        assert!(registry.contains("User"));
        assert_eq!(
            registered(&registry, "Hidden"),
            json!({"type": "object", "properties": {"X": {"type": "number"}}})
        );
    }

    #[test]
    fn declared_metadata_survives_later_occurrences() {
        let account = Object::new("", "Account")
            .with_tag("desc", "Billing account")
            .with_fields(vec![Object::builtin("Balance", "float64")]);
        let owner = Object {
            name: "owner".to_string(),
            ..account.clone()
        }
        .with_tag("desc", "Paying account");
        let node = Node {
            types: vec![account],
            services: vec![make_service(
                "Billing",
                vec![Method::new("Charge").with_arguments(vec![owner])],
            )],
        };

        let mut registry = SchemaRegistry::new();
        SchemaSynthesizer::new(&mut registry).synthesize(&node);

        assert_eq!(
            registered(&registry, "Account")["description"],
            "Billing account"
        );
    }

    #[test]
    fn exchange_schemas_keep_json_tag_names() {
        let method = Method::new("Get")
            .with_arguments(vec![Object::builtin("id", "string").with_type_tag("json", &["id"])]);
        let node = Node {
            types: vec![],
            services: vec![make_service("Items", vec![method])],
        };
        let registry = build_registry(&node, &SynthConfig::default());

        assert_eq!(
            registered(&registry, "GetRequest"),
            json!({"type": "object", "properties": {"id": {"type": "string"}}})
        );
    }

    #[test]
    fn synthesis_is_deterministic() {
        let node = user_service_node();
        let config = SynthConfig::default();

        let first = serde_json::to_string(&build_registry(&node, &config)).unwrap();
        let second = serde_json::to_string(&build_registry(&node, &config)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn exchange_members_use_wire_names() {
        let service = make_service("Users", vec![get_user_method()]);
        let mut registry = SchemaRegistry::new();
        SchemaSynthesizer::new(&mut registry)
            .register_exchange_schemas(&service, &SynthConfig::default());

        let request = registered(&registry, "GetUserRequest");
        assert!(request["properties"].get("Id").is_some());
        assert!(request["properties"].get("ctx").is_none());
        assert!(registry.contains("User"));
    }
}
