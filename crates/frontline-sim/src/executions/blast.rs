//! Blast resolution and detonation patterns.

use std::f64::consts::TAU;

use glam::DVec2;
use tracing::debug;

use frontline_core::types::{Owner, PlayerId, Tick, TileRef, UnitId};

use crate::game::Game;
use crate::random::PseudoRandom;

/// Apply blasts of `radius` around every center.
///
/// Owned tiles in range cost their owner troops (once per center), every
/// non-munition unit in range is destroyed, and structures within the
/// refresh margin are touched. Tile ownership never changes.
pub fn apply_blast(game: &mut Game, centers: &[TileRef], radius: u32, by: PlayerId, tick: Tick) {
    let damage = game.config().rocket.troop_damage;
    let margin = game.config().rocket.refresh_margin;

    for &center in centers {
        let victims: Vec<PlayerId> = game
            .map()
            .disc(center, radius)
            .into_iter()
            .filter_map(|t| game.owner(t).player())
            .collect();
        for victim in victims {
            if let Some(player) = game.player_mut(victim) {
                player.remove_troops(damage);
            }
        }
    }

    let within = |game: &Game, tile: TileRef, r: u32| {
        let r2 = r as u64 * r as u64;
        centers
            .iter()
            .any(|&c| game.map().euclidean_dist_squared(c, tile) <= r2)
    };

    let destroyed: Vec<UnitId> = game
        .units()
        .filter(|u| !u.kind().is_munition() && within(game, u.tile(), radius))
        .map(|u| u.id())
        .collect();
    for &id in &destroyed {
        game.delete_unit(id, Some(by));
    }

    let refreshed: Vec<UnitId> = game
        .units()
        .filter(|u| u.kind().is_structure() && within(game, u.tile(), radius + margin))
        .map(|u| u.id())
        .collect();
    for &id in &refreshed {
        if let Some(unit) = game.unit_mut(id) {
            unit.touch(tick);
        }
    }

    debug!(
        tick,
        centers = centers.len(),
        destroyed = destroyed.len(),
        refreshed = refreshed.len(),
        "blast applied"
    );
}

/// Random in-bounds tile at most `radius` away from `center`, or `None`
/// after `attempts` misses.
fn scatter_point(
    game: &Game,
    random: &mut PseudoRandom,
    center: TileRef,
    radius: u32,
    attempts: u32,
) -> Option<TileRef> {
    (0..attempts).find_map(|_| {
        let dist = random.next_float(0.0, radius as f64);
        offset_tile(game, center, random, dist, radius)
    })
}

/// Tile `dist` away from `center` in a random direction. `None` when it
/// falls off the map or rounds to more than `limit` tiles away.
fn offset_tile(
    game: &Game,
    center: TileRef,
    random: &mut PseudoRandom,
    dist: f64,
    limit: u32,
) -> Option<TileRef> {
    let map = game.map();
    let origin = DVec2::new(map.x(center) as f64, map.y(center) as f64);
    let p = (origin + DVec2::from_angle(random.next_float(0.0, TAU)) * dist).round();
    let tile = map.tile_ref(p.x as i32, p.y as i32)?;
    let limit2 = limit as u64 * limit as u64;
    (map.euclidean_dist_squared(center, tile) <= limit2).then_some(tile)
}

/// Detonation centers for a tactical rocket: the destination, plus the
/// configured number of scattered extra bursts.
pub fn tactical_centers(game: &Game, random: &mut PseudoRandom, dst: TileRef) -> Vec<TileRef> {
    let config = &game.config().rocket;
    let mut centers = vec![dst];
    for _ in 0..config.tactical_extra_bursts {
        if let Some(tile) = scatter_point(
            game,
            random,
            dst,
            config.tactical_scatter_radius,
            config.tactical_scatter_attempts,
        ) {
            centers.push(tile);
        }
    }
    centers
}

/// Secondary targets for a splitting cluster rocket. Always returns
/// exactly `bomblet_count` tiles.
///
/// Filled in order: the destination; the destination owner's units in the
/// spread, farthest first; random tiles in the spread matching the
/// destination's terrain and owner with minimum spacing, relaxing spacing
/// and then ownership as attempts run out; finally the destination again.
pub fn cluster_targets(game: &Game, random: &mut PseudoRandom, dst: TileRef) -> Vec<TileRef> {
    let config = &game.config().rocket;
    let map = game.map();
    let count = config.bomblet_count.max(1) as usize;
    let spread2 = config.cluster_spread_radius as u64 * config.cluster_spread_radius as u64;
    let spacing2 = config.cluster_min_spacing as u64 * config.cluster_min_spacing as u64;

    let spaced = |targets: &[TileRef], tile: TileRef| {
        targets
            .iter()
            .all(|&t| map.euclidean_dist_squared(t, tile) >= spacing2)
    };

    let mut targets = vec![dst];
    let dst_owner = game.owner(dst);

    if let Owner::Player(victim) = dst_owner {
        let mut assets: Vec<(u64, UnitId, TileRef)> = game
            .units()
            .filter(|u| u.owner() == victim && !u.kind().is_munition())
            .map(|u| (map.euclidean_dist_squared(dst, u.tile()), u.id(), u.tile()))
            .filter(|&(d2, _, _)| d2 <= spread2)
            .collect();
        assets.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        for (_, _, tile) in assets {
            if targets.len() >= count {
                break;
            }
            if spaced(&targets, tile) {
                targets.push(tile);
            }
        }
    }

    let want_land = map.is_land(dst);
    let spread = config.cluster_spread_radius;
    // 0: spacing + owner + terrain, 1: owner + terrain, 2: terrain only
    for relax in 0..3 {
        for _ in 0..config.cluster_placement_attempts {
            if targets.len() >= count {
                break;
            }
            let dist = random.next_float(0.0, spread as f64);
            let Some(tile) = offset_tile(game, dst, random, dist, spread) else {
                continue;
            };
            if map.is_land(tile) != want_land {
                continue;
            }
            if relax < 2 && game.owner(tile) != dst_owner {
                continue;
            }
            if relax < 1 && !spaced(&targets, tile) {
                continue;
            }
            targets.push(tile);
        }
    }

    targets.resize(count, dst);
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::UnitParams;
    use frontline_core::config::GameConfig;
    use frontline_core::enums::{Terrain, UnitKind};
    use frontline_map::GameMap;

    fn make_game() -> (Game, PlayerId, PlayerId) {
        let map = GameMap::filled(80, 80, Terrain::Land).unwrap();
        let mut game = Game::new(map, GameConfig::default(), 11);
        let red = game.add_player("red", 0, 10_000);
        let blue = game.add_player("blue", 0, 10_000);
        (game, red, blue)
    }

    fn free() -> UnitParams {
        UnitParams {
            skip_cost: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_blast_costs_troops_per_owned_tile() {
        let (mut game, red, blue) = make_game();
        let center = game.map().tile_ref(40, 40).unwrap();
        let near = game.map().tile_ref(41, 40).unwrap();
        let far = game.map().tile_ref(70, 70).unwrap();
        game.conquer(blue, center);
        game.conquer(blue, near);
        game.conquer(blue, far);

        apply_blast(&mut game, &[center], 5, red, 7);

        assert_eq!(game.player(blue).unwrap().troops(), 10_000 - 2 * 50);
        assert_eq!(game.player(red).unwrap().troops(), 10_000);
        assert!(game.owner(center).is(blue));
        assert!(game.owner(near).is(blue));
    }

    #[test]
    fn test_blast_spares_munitions_and_refreshes_structures() {
        let (mut game, red, blue) = make_game();
        let at = |game: &Game, x, y| game.map().tile_ref(x, y).unwrap();
        let center = at(&game, 40, 40);
        let city = game
            .build_unit(blue, UnitKind::City, at(&game, 42, 40), free())
            .unwrap();
        let post = game
            .build_unit(blue, UnitKind::DefensePost, at(&game, 40, 48), free())
            .unwrap();
        let rocket = game
            .build_unit(red, UnitKind::TacticalRocket, center, free())
            .unwrap();

        apply_blast(&mut game, &[center], 5, red, 9);

        assert!(!game.is_unit_active(city));
        assert!(game.is_unit_active(post));
        assert_eq!(game.unit(post).unwrap().touched_at(), 9);
        assert!(game.is_unit_active(rocket));
    }

    #[test]
    fn test_troop_damage_floors_at_zero() {
        let (mut game, red, blue) = make_game();
        game.player_mut(blue).unwrap().remove_troops(9_990);
        let center = game.map().tile_ref(10, 10).unwrap();
        for t in game.map().disc(center, 3) {
            game.conquer(blue, t);
        }
        apply_blast(&mut game, &[center], 3, red, 0);
        assert_eq!(game.player(blue).unwrap().troops(), 0);
    }

    #[test]
    fn test_cluster_targets_exact_count_and_spacing() {
        let (mut game, _, blue) = make_game();
        let dst = game.map().tile_ref(40, 40).unwrap();
        for t in game.map().disc(dst, 45) {
            game.conquer(blue, t);
        }
        let mut random = PseudoRandom::new(5);
        let targets = cluster_targets(&game, &mut random, dst);

        assert_eq!(targets.len(), game.config().rocket.bomblet_count as usize);
        assert_eq!(targets[0], dst);
        let spacing2 = 12u64 * 12;
        for (i, &a) in targets.iter().enumerate() {
            assert!(game.map().euclidean_dist_squared(dst, a) <= 40 * 40);
            for &b in &targets[i + 1..] {
                assert!(game.map().euclidean_dist_squared(a, b) >= spacing2);
            }
        }
    }

    #[test]
    fn test_cluster_targets_prefer_enemy_units_farthest_first() {
        let (mut game, _, blue) = make_game();
        let dst = game.map().tile_ref(40, 40).unwrap();
        game.conquer(blue, dst);
        let near = game.map().tile_ref(55, 40).unwrap();
        let far = game.map().tile_ref(40, 75).unwrap();
        game.build_unit(blue, UnitKind::City, near, free()).unwrap();
        game.build_unit(blue, UnitKind::Port, far, free()).unwrap();

        let mut random = PseudoRandom::new(5);
        let targets = cluster_targets(&game, &mut random, dst);
        assert_eq!(&targets[..3], &[dst, far, near]);
    }

    #[test]
    fn test_cluster_targets_fall_back_to_destination() {
        let map = GameMap::from_ascii(&["~~~", "~#~", "~~~"]).unwrap();
        let game = Game::new(map, GameConfig::default(), 1);
        let dst = game.map().tile_ref(1, 1).unwrap();
        let mut random = PseudoRandom::new(2);
        let targets = cluster_targets(&game, &mut random, dst);
        assert_eq!(targets, vec![dst; 5]);
    }

    #[test]
    fn test_tactical_centers_stay_on_map() {
        let (game, _, _) = make_game();
        let corner = game.map().tile_ref(0, 0).unwrap();
        let mut random = PseudoRandom::new(8);
        let centers = tactical_centers(&game, &mut random, corner);
        assert_eq!(centers[0], corner);
        assert!(centers.len() <= 3);
        assert!(centers.iter().all(|&t| game.map().contains(t)));
    }

    #[test]
    fn test_tactical_centers_stay_within_scatter_radius() {
        let (game, _, _) = make_game();
        let dst = game.map().tile_ref(40, 40).unwrap();
        let radius = game.config().rocket.tactical_scatter_radius as u64;
        for seed in 0..500 {
            let mut random = PseudoRandom::new(seed);
            for center in tactical_centers(&game, &mut random, dst) {
                let d2 = game.map().euclidean_dist_squared(dst, center);
                assert!(d2 <= radius * radius, "seed {seed}: d2 {d2}");
            }
        }
    }

    #[test]
    fn test_cluster_fill_stays_within_spread() {
        let (mut game, _, blue) = make_game();
        let dst = game.map().tile_ref(40, 40).unwrap();
        for t in game.map().disc(dst, 60) {
            game.conquer(blue, t);
        }
        let spread = game.config().rocket.cluster_spread_radius as u64;
        for seed in 0..200 {
            let mut random = PseudoRandom::new(seed);
            for target in cluster_targets(&game, &mut random, dst) {
                assert!(game.map().euclidean_dist_squared(dst, target) <= spread * spread);
            }
        }
    }
}
