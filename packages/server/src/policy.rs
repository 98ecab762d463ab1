use common::{ObjectType, RelationKind};

/// Consistency rule between an external object's type and the kind of
/// relation a document may have to it.
///
/// The concrete rule belongs to the registries that own the objects; this
/// service only consults it as a predicate before persisting a relation.
pub trait RelationPolicy: Send + Sync {
    fn is_valid(&self, object_type: ObjectType, kind: RelationKind) -> bool;
}

/// Accepts every combination, until the owning registries publish a rule.
pub struct PermissiveRelationPolicy;

impl RelationPolicy for PermissiveRelationPolicy {
    fn is_valid(&self, _object_type: ObjectType, _kind: RelationKind) -> bool {
        true
    }
}
