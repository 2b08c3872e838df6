// entity_model
/// Declare the static runtime model for one entity and wire up `EntityKind`.
///
/// One declaration per entity replaces the per-field method explosion of
/// generated mappers: the field table drives predicate validation, column
/// mapping, and ordering whitelists for the whole operator surface.
///
/// ```ignore
/// entity_model! {
///     entity Book {
///         name: "Book",
///         namespace: "demo.book",
///         key: "id" => u64,
///         fields: [
///             "id" => "id": Uint,
///             "name" => "name": Text,
///             "author" => "author": Uint,
///         ],
///     }
/// }
/// ```
#[macro_export]
macro_rules! entity_model {
    (
        entity $entity:ty {
            name: $name:literal,
            namespace: $namespace:literal,
            key: $key_field:literal => $key:ty,
            fields: [ $( $field:literal => $column:literal : $kind:ident ),+ $(,)? ] $(,)?
        }
    ) => {
        impl $crate::traits::EntityKind for $entity {
            type Key = $key;
            type Record = Self;

            const MODEL: &'static $crate::model::EntityModel = &$crate::model::EntityModel {
                entity_name: $name,
                namespace: $namespace,
                primary_key: $key_field,
                fields: &[
                    $(
                        $crate::model::FieldModel {
                            name: $field,
                            column: $column,
                            kind: $crate::model::FieldKind::$kind,
                        },
                    )+
                ],
            };
        }
    };
}
