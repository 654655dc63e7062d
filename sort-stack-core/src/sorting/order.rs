//! Render-order computation for flat and grouped stacks

use super::compare::Comparator;
use super::key::{extract_sort_key, SortKey};
use crate::types::{Group, Panel, SortSpec, StackBody, StackPlan, StateLookup};

/// Stable sort of `items` by the key `key_of` derives for each of them.
fn sort_by_key<'a, T>(
    items: impl IntoIterator<Item = &'a T>,
    key_of: impl Fn(&T) -> SortKey,
    comparator: &Comparator,
) -> Vec<&'a T>
where
    T: 'a,
{
    let mut keyed: Vec<(SortKey, &'a T)> = items
        .into_iter()
        .map(|item| (key_of(item), item))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| comparator.compare(a, b));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Orders a flat list of panels by `spec`.
///
/// Panels with equal keys keep their configured relative order.
pub fn order_flat<'a, S>(panels: &'a [Panel], states: &S, spec: &SortSpec) -> Vec<&'a Panel>
where
    S: StateLookup + ?Sized,
{
    let comparator = Comparator::new(spec);
    sort_by_key(
        panels,
        |panel| extract_sort_key(&panel.config, states, spec),
        &comparator,
    )
}

/// Orders groups by their main panel under `spec`, emitting each main panel
/// followed by its members.
///
/// Members are only reordered when their group carries a sort override, merged over
/// `spec`; otherwise they keep their configured order.
pub fn order_groups<'a, S>(groups: &'a [Group], states: &S, spec: &SortSpec) -> Vec<&'a Panel>
where
    S: StateLookup + ?Sized,
{
    let comparator = Comparator::new(spec);
    let sorted = sort_by_key(
        groups,
        |group| extract_sort_key(&group.main.config, states, spec),
        &comparator,
    );

    let mut ordered = Vec::with_capacity(
        groups
            .iter()
            .map(|group| 1 + group.members.len())
            .sum::<usize>(),
    );
    for group in sorted {
        ordered.push(&group.main);
        match &group.sort_override {
            Some(over) => {
                let effective = spec.merged(over);
                ordered.extend(order_flat(&group.members, states, &effective));
            }
            None => ordered.extend(group.members.iter()),
        }
    }
    ordered
}

/// Render order of a whole stack for one state snapshot
pub fn order_plan<'a, S>(plan: &'a StackPlan, states: &S) -> Vec<&'a Panel>
where
    S: StateLookup + ?Sized,
{
    match &plan.body {
        StackBody::Flat(panels) => order_flat(panels, states, &plan.sort),
        StackBody::Grouped(groups) => order_groups(groups, states, &plan.sort),
    }
}
