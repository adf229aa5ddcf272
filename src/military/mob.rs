use crate::model::*;
use shrinkwraprs::*;

/// A set of same-side agents transitively linked by range. Mobs are derived
/// fresh every tick and never persisted.
#[derive(Shrinkwrap, Clone, Debug, Default)]
pub struct Mob<'a>(pub Vec<&'a Agent>);

impl<'a> Mob<'a> {
    pub fn contains(&self, id: AgentId) -> bool {
        self.0.iter().any(|a| a.id == id)
    }

    /// Range from `pos` to the closest member, `None` for an empty mob.
    pub fn range_to_nearest(&self, pos: Position) -> Option<u32> {
        self.0.iter().map(|a| pos.get_range_to(a.pos)).min()
    }
}

/// Grows a mob outward from `origin` through `candidates`, marking every
/// absorbed candidate in `visited`. Iterative so stack use stays bounded, and
/// each candidate is enqueued at most once.
fn flood_fill<'a>(origin: Position, candidates: &[&'a Agent], link_range: u32, visited: &mut [bool], members: &mut Vec<&'a Agent>) {
    let mut to_visit = vec![origin];

    while let Some(current) = to_visit.pop() {
        for (index, candidate) in candidates.iter().enumerate() {
            if !visited[index] && current.in_range_to(candidate.pos, link_range) {
                visited[index] = true;
                members.push(*candidate);
                to_visit.push(candidate.pos);
            }
        }
    }
}

/// The mob containing `seed`. The seed is always a member, even when it is
/// not one of the candidates.
pub fn find_mob<'a>(seed: &'a Agent, candidates: &[&'a Agent], link_range: u32) -> Mob<'a> {
    let mut visited = vec![false; candidates.len()];

    for (index, candidate) in candidates.iter().enumerate() {
        if candidate.id == seed.id {
            visited[index] = true;
        }
    }

    let mut members = vec![seed];

    flood_fill(seed.pos, candidates, link_range, &mut visited, &mut members);

    Mob(members)
}

/// The mob reachable from a bare position, e.g. the agents guarding a
/// structure. The position itself contributes nothing to the mob.
pub fn find_mob_around<'a>(pos: Position, candidates: &[&'a Agent], link_range: u32) -> Mob<'a> {
    let mut visited = vec![false; candidates.len()];
    let mut members = Vec::new();

    flood_fill(pos, candidates, link_range, &mut visited, &mut members);

    Mob(members)
}

/// Splits `candidates` into disjoint mobs covering every candidate. Mobs are
/// returned in the order of their first member in the input.
pub fn partition_mobs<'a>(candidates: &[&'a Agent], link_range: u32) -> Vec<Mob<'a>> {
    let mut visited = vec![false; candidates.len()];
    let mut mobs = Vec::new();

    for (index, candidate) in candidates.iter().enumerate() {
        if visited[index] {
            continue;
        }

        visited[index] = true;

        let mut members = vec![*candidate];

        flood_fill(candidate.pos, candidates, link_range, &mut visited, &mut members);

        mobs.push(Mob(members));
    }

    mobs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn fighter(id: u32, x: i32, y: i32) -> Agent {
        Agent::new(id, Owner::Mine, Position::new(x, y), &[Part::Attack, Part::Move])
    }

    fn ids(mob: &Mob) -> HashSet<u32> {
        mob.iter().map(|a| a.id.0).collect()
    }

    #[test]
    fn chain_links_transitively() {
        let agents = vec![fighter(1, 0, 0), fighter(2, 2, 0), fighter(3, 4, 1), fighter(4, 9, 9)];
        let candidates: Vec<&Agent> = agents.iter().collect();

        let mob = find_mob(&agents[0], &candidates, 2);

        assert_eq!(ids(&mob), [1, 2, 3].into_iter().collect());
    }

    #[test]
    fn seed_outside_candidates_is_still_a_member() {
        let agents = vec![fighter(1, 10, 10), fighter(2, 11, 11)];
        let outsider = fighter(9, 12, 12);
        let candidates: Vec<&Agent> = agents.iter().collect();

        let mob = find_mob(&outsider, &candidates, 2);

        assert_eq!(ids(&mob), [1, 2, 9].into_iter().collect());
    }

    #[test]
    fn mob_around_position_excludes_the_position() {
        let agents = vec![fighter(1, 50, 52), fighter(2, 50, 54), fighter(3, 50, 70)];
        let candidates: Vec<&Agent> = agents.iter().collect();

        let mob = find_mob_around(Position::new(50, 50), &candidates, 2);

        assert_eq!(ids(&mob), [1, 2].into_iter().collect());
    }

    #[test]
    fn partition_covers_every_agent_exactly_once() {
        let agents: Vec<Agent> = (0..30).map(|i| fighter(i, (i * 7 % 23) as i32, (i * 13 % 17) as i32)).collect();
        let candidates: Vec<&Agent> = agents.iter().collect();

        for link_range in 0..6 {
            let mobs = partition_mobs(&candidates, link_range);
            let mut seen = HashSet::new();

            for mob in mobs.iter() {
                for agent in mob.iter() {
                    assert!(seen.insert(agent.id), "agent {} in two mobs", agent.id);
                }
            }

            assert_eq!(seen.len(), agents.len());
        }
    }

    #[test]
    fn partition_members_are_linked_and_mobs_are_apart() {
        let agents: Vec<Agent> = (0..25).map(|i| fighter(i, (i * 11 % 31) as i32, (i * 5 % 19) as i32)).collect();
        let candidates: Vec<&Agent> = agents.iter().collect();
        let link_range = 3;

        let mobs = partition_mobs(&candidates, link_range);

        for (i, a) in mobs.iter().enumerate() {
            for (j, b) in mobs.iter().enumerate() {
                if i == j {
                    continue;
                }
                for x in a.iter() {
                    for y in b.iter() {
                        assert!(x.pos.get_range_to(y.pos) > link_range);
                    }
                }
            }

            if a.len() > 1 {
                for x in a.iter() {
                    assert!(a.iter().any(|y| y.id != x.id && x.pos.in_range_to(y.pos, link_range)));
                }
            }
        }
    }

    #[test]
    fn zero_link_range_gives_singletons() {
        let agents = vec![fighter(1, 0, 0), fighter(2, 1, 0), fighter(3, 0, 1)];
        let candidates: Vec<&Agent> = agents.iter().collect();

        let mobs = partition_mobs(&candidates, 0);

        assert_eq!(mobs.len(), 3);
        assert!(mobs.iter().all(|m| m.len() == 1));
    }

    #[test]
    fn huge_link_range_gives_one_mob() {
        let agents = vec![fighter(1, 0, 0), fighter(2, 99, 99), fighter(3, 0, 99), fighter(4, 50, 3)];
        let candidates: Vec<&Agent> = agents.iter().collect();

        let mobs = partition_mobs(&candidates, 142);

        assert_eq!(mobs.len(), 1);
        assert_eq!(mobs[0].len(), 4);
    }

    #[test]
    fn empty_input_has_no_mobs() {
        assert!(partition_mobs(&[], 2).is_empty());
    }
}
