//! Nearest service point search.
//!
//! Premium classes don't stop everywhere. When a journey endpoint lacks the
//! class being priced, the fare is taken from the nearest stop on the same
//! route that does offer it, searching away from the other endpoint.

use crate::domain::{Direction, Role, Section, SectionId, ServiceClass};
use crate::network::RouteSections;

/// Which side of the reference id to search.
fn searches_backward(direction: Direction, role: Role) -> bool {
    matches!(
        (role, direction),
        (Role::Origin, Direction::Up) | (Role::Destination, Direction::Down)
    )
}

/// Find the section closest to `reference` that offers `class`.
///
/// Boarding on an ascending journey or alighting on a descending one
/// searches ids strictly below `reference`; the other two cases search
/// strictly above it. Sections are scanned in ascending id order and the
/// first of equally distant candidates is kept.
///
/// Returns `None` if no section on the required side offers the class.
pub fn nearest_service_point(
    route: &RouteSections,
    reference: SectionId,
    direction: Direction,
    role: Role,
    class: ServiceClass,
) -> Option<&Section> {
    let backward = searches_backward(direction, role);

    route
        .sections()
        .iter()
        .filter(|s| s.services.contains(class))
        .filter(|s| {
            if backward {
                s.id < reference
            } else {
                s.id > reference
            }
        })
        .fold(None, |best: Option<&Section>, s| match best {
            Some(b) if b.id.0.abs_diff(reference.0) <= s.id.0.abs_diff(reference.0) => Some(b),
            _ => Some(s),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RouteNo;
    use crate::network::{NetworkIndex, NetworkTables};
    use serde_json::json;

    /// Route 1 with sections at ids 0..=10; SL only at 2, 5 and 9.
    fn index() -> NetworkIndex {
        let sections = (0..=10)
            .map(|id| {
                let tag = if [2, 5, 9].contains(&id) { "SL" } else { "" };
                json!({"route_no": "1", "section_name": format!("S{id}"), "section_id": id, "service_type": tag})
            })
            .collect();
        NetworkIndex::build(NetworkTables {
            sections,
            ..Default::default()
        })
    }

    fn nearest(
        index: &NetworkIndex,
        reference: i64,
        direction: Direction,
        role: Role,
    ) -> Option<i64> {
        let route = index.route(&RouteNo::normalize("1")).unwrap();
        nearest_service_point(
            route,
            SectionId(reference),
            direction,
            role,
            ServiceClass::SemiLuxury,
        )
        .map(|s| s.id.0)
    }

    #[test]
    fn origin_going_up_searches_backward() {
        let index = index();
        assert_eq!(nearest(&index, 4, Direction::Up, Role::Origin), Some(2));
        assert_eq!(nearest(&index, 8, Direction::Up, Role::Origin), Some(5));
    }

    #[test]
    fn destination_going_up_searches_forward() {
        let index = index();
        assert_eq!(nearest(&index, 4, Direction::Up, Role::Destination), Some(5));
        assert_eq!(nearest(&index, 6, Direction::Up, Role::Destination), Some(9));
    }

    #[test]
    fn origin_going_down_searches_forward() {
        let index = index();
        assert_eq!(nearest(&index, 7, Direction::Down, Role::Origin), Some(9));
    }

    #[test]
    fn destination_going_down_searches_backward() {
        let index = index();
        assert_eq!(nearest(&index, 7, Direction::Down, Role::Destination), Some(5));
    }

    #[test]
    fn reference_itself_is_excluded() {
        let index = index();
        assert_eq!(nearest(&index, 5, Direction::Up, Role::Origin), Some(2));
        assert_eq!(nearest(&index, 5, Direction::Up, Role::Destination), Some(9));
    }

    #[test]
    fn none_when_required_side_has_no_service() {
        let index = index();
        assert_eq!(nearest(&index, 1, Direction::Up, Role::Origin), None);
        assert_eq!(nearest(&index, 10, Direction::Up, Role::Destination), None);
        assert_eq!(nearest(&index, 10, Direction::Down, Role::Origin), None);
    }

    #[test]
    fn equally_close_sections_resolve_by_name() {
        let index = NetworkIndex::build(NetworkTables {
            sections: vec![
                json!({"route_no": "1", "section_name": "Zeta", "section_id": 2, "service_type": "SL"}),
                json!({"route_no": "1", "section_name": "Alpha", "section_id": 2, "service_type": "SL"}),
                json!({"route_no": "1", "section_name": "O", "section_id": 5}),
            ],
            ..Default::default()
        });
        let route = index.route(&RouteNo::normalize("1")).unwrap();
        let found = nearest_service_point(
            route,
            SectionId(5),
            Direction::Up,
            Role::Origin,
            ServiceClass::SemiLuxury,
        )
        .unwrap();
        assert_eq!(found.name, "Alpha");
    }

    #[test]
    fn class_must_match() {
        let index = index();
        let route = index.route(&RouteNo::normalize("1")).unwrap();
        let found = nearest_service_point(
            route,
            SectionId(4),
            Direction::Up,
            Role::Origin,
            ServiceClass::AirConditioned,
        );
        assert!(found.is_none());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::RouteNo;
    use crate::network::{NetworkIndex, NetworkTables};
    use proptest::prelude::*;
    use serde_json::json;

    fn direction() -> impl Strategy<Value = Direction> {
        prop_oneof![Just(Direction::Up), Just(Direction::Down)]
    }

    fn role() -> impl Strategy<Value = Role> {
        prop_oneof![Just(Role::Origin), Just(Role::Destination)]
    }

    proptest! {
        /// The result is on the allowed side, offers the class, and no
        /// qualifying section on that side is closer.
        #[test]
        fn respects_direction_and_is_closest(
            tagged in proptest::collection::btree_set(0i64..40, 0..12),
            reference in 0i64..40,
            direction in direction(),
            role in role(),
        ) {
            let sections = (0i64..40)
                .map(|id| {
                    let tag = if tagged.contains(&id) { "LX" } else { "" };
                    json!({"route_no": "5", "section_name": format!("S{id}"), "section_id": id, "service_type": tag})
                })
                .collect();
            let index = NetworkIndex::build(NetworkTables { sections, ..Default::default() });
            let route = index.route(&RouteNo::normalize("5")).unwrap();

            let found = nearest_service_point(
                route,
                SectionId(reference),
                direction,
                role,
                ServiceClass::AirConditioned,
            );

            let backward = searches_backward(direction, role);
            let expected = if backward {
                tagged.range(..reference).next_back().copied()
            } else {
                tagged.range(reference + 1..).next().copied()
            };
            prop_assert_eq!(found.map(|s| s.id.0), expected);

            if let Some(s) = found {
                prop_assert!(s.services.contains(ServiceClass::AirConditioned));
                if backward {
                    prop_assert!(s.id.0 < reference);
                } else {
                    prop_assert!(s.id.0 > reference);
                }
            }
        }
    }
}
