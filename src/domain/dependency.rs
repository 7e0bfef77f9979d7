/// A directed edge "dependent requires blocker". Both endpoints are item
/// ids; they may belong to different lists. Shared, not owned — deleting
/// either endpoint's containing list removes the edge, but the edge has
/// no independent identity beyond the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub dependent_item_id: i32,
    pub required_item_id: i32,
}
