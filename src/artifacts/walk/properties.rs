use super::*;
use crate::artifacts::filter::test_support::{oid, person};
use crate::artifacts::filter::{
    AllFilter, AndFilter, CommitLimitFilter, MessageFilter, NotFilter, OrFilter,
};
use crate::artifacts::graph::memory::InMemoryCommitGraph;
use proptest::prelude::*;

/// Per commit: two parent picks, how many of them to keep, a timestamp
/// offset and a color for the message
type CommitSeed = (usize, usize, usize, i64, bool);

fn seeds_strategy() -> impl Strategy<Value = Vec<CommitSeed>> {
    prop::collection::vec(
        (any::<usize>(), any::<usize>(), 0usize..3, 0i64..500, any::<bool>()),
        1..30,
    )
}

/// Random DAG where commit `i` only points at commits `0..i`
fn build_graph(seeds: &[CommitSeed]) -> (InMemoryCommitGraph, Vec<ObjectId>) {
    let mut commits = Vec::with_capacity(seeds.len());
    let mut has_child = vec![false; seeds.len()];

    for (index, &(first, second, parent_count, offset, red)) in seeds.iter().enumerate() {
        let mut parents = Vec::new();
        if index > 0 {
            for pick in [first, second].into_iter().take(parent_count) {
                let parent = pick % index;
                if !parents.contains(&parent) {
                    parents.push(parent);
                    has_child[parent] = true;
                }
            }
        }

        let who = person(Some("Jane"), Some("jane@example.com"), offset * 60);
        let color = if red { "red" } else { "blue" };
        commits.push(Commit::new(
            oid(&format!("c{index}")),
            parents
                .iter()
                .map(|parent| oid(&format!("c{parent}")))
                .collect(),
            who.clone(),
            who,
            format!("c{index} {color}"),
        ));
    }

    let tips = (0..seeds.len())
        .rev()
        .filter(|&index| !has_child[index])
        .map(|index| oid(&format!("c{index}")))
        .collect();

    (commits.into_iter().collect(), tips)
}

fn walk_with(
    graph: &InMemoryCommitGraph,
    tips: &[ObjectId],
    order: SortOrder,
    filter: BoxedFilter,
) -> Vec<ObjectId> {
    RevWalk::new(graph, filter)
        .with_order(order)
        .walk(tips)
        .unwrap()
        .iter()
        .map(|commit| commit.oid().clone())
        .collect()
}

fn is_red(graph: &InMemoryCommitGraph, oid: &ObjectId) -> bool {
    graph.commit(oid).unwrap().message().ends_with("red")
}

fn red() -> MessageFilter {
    MessageFilter::new("red$").unwrap()
}

fn order_strategy() -> impl Strategy<Value = SortOrder> {
    prop_oneof![Just(SortOrder::Date), Just(SortOrder::Topological)]
}

proptest! {
    #[test]
    fn prop_every_reachable_commit_is_visited_once(
        seeds in seeds_strategy(),
        order in order_strategy(),
    ) {
        let (graph, tips) = build_graph(&seeds);

        let visited = walk_with(&graph, &tips, order, Box::new(AllFilter::new()));
        let distinct = visited.iter().collect::<HashSet<_>>();

        // every commit is reachable from some tip
        prop_assert_eq!(visited.len(), seeds.len());
        prop_assert_eq!(distinct.len(), seeds.len());
    }

    #[test]
    fn prop_topological_order_puts_children_first(seeds in seeds_strategy()) {
        let (graph, tips) = build_graph(&seeds);

        let visited = walk_with(&graph, &tips, SortOrder::Topological, Box::new(AllFilter::new()));
        let position = visited
            .iter()
            .enumerate()
            .map(|(index, oid)| (oid.clone(), index))
            .collect::<HashMap<_, _>>();

        for child in &visited {
            for parent in graph.commit(child).unwrap().parents() {
                prop_assert!(position[child] < position[parent]);
            }
        }
    }

    #[test]
    fn prop_and_keeps_commits_both_children_include(
        seeds in seeds_strategy(),
        order in order_strategy(),
    ) {
        let (graph, tips) = build_graph(&seeds);
        let everything = walk_with(&graph, &tips, order, Box::new(AllFilter::new()));

        let filter = AndFilter::default().add(red()).add(AllFilter::new());
        let selected = walk_with(&graph, &tips, order, Box::new(filter));

        let expected = everything
            .into_iter()
            .filter(|oid| is_red(&graph, oid))
            .collect::<Vec<_>>();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_not_selects_the_complement(
        seeds in seeds_strategy(),
        order in order_strategy(),
    ) {
        let (graph, tips) = build_graph(&seeds);
        let everything = walk_with(&graph, &tips, order, Box::new(AllFilter::new()));

        let selected = walk_with(&graph, &tips, order, Box::new(NotFilter::new(Box::new(red()))));

        let expected = everything
            .into_iter()
            .filter(|oid| !is_red(&graph, oid))
            .collect::<Vec<_>>();
        prop_assert_eq!(selected, expected);
    }

    #[test]
    fn prop_or_of_complements_selects_everything(
        seeds in seeds_strategy(),
        order in order_strategy(),
    ) {
        let (graph, tips) = build_graph(&seeds);
        let everything = walk_with(&graph, &tips, order, Box::new(AllFilter::new()));

        let filter = OrFilter::default()
            .add(red())
            .add(NotFilter::new(Box::new(red())));
        let selected = walk_with(&graph, &tips, order, Box::new(filter));

        prop_assert_eq!(selected, everything);
    }

    #[test]
    fn prop_repeated_walks_are_identical(
        seeds in seeds_strategy(),
        order in order_strategy(),
        limit in 0usize..10,
    ) {
        let (graph, tips) = build_graph(&seeds);
        let filter = AndFilter::default().add(red()).add(CommitLimitFilter::new(limit));

        let mut walk = RevWalk::new(&graph, Box::new(filter)).with_order(order);
        let first = walk.walk(&tips).unwrap();
        let second = walk.walk(&tips).unwrap();

        prop_assert!(first.len() <= limit);
        prop_assert_eq!(first, second);
    }
}
