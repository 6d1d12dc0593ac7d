#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::constants::*;
    use crate::enums::UnitKind;
    use crate::error::ConfigError;
    use crate::events::{DiagnosticKind, GameEvent};
    use crate::state::WorldSnapshot;
    use crate::types::{Owner, PlayerId, TileRef, UnitId};

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_health(UnitKind::Warship), WARSHIP_MAX_HEALTH);
        assert_eq!(config.cost(UnitKind::ClusterRocket), CLUSTER_ROCKET_COST);
        assert_eq!(config.warship.volley_size, 2);
        assert_eq!(config.missile_ship.volley_size, 1);
        assert_eq!(config.rocket.bomblet_count, 5);
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let config = GameConfig::with_overrides(
            r#"{
                "spawn_phase_turns": 0,
                "warship": { "volley_size": 3 },
                "units": { "Warship": { "max_health": 400, "cost": 10 } }
            }"#,
        )
        .unwrap();

        assert_eq!(config.spawn_phase_turns, 0);
        assert_eq!(config.warship.volley_size, 3);
        // Untouched siblings keep their defaults.
        assert_eq!(config.warship.shell_attack_rate, WARSHIP_SHELL_ATTACK_RATE);
        assert_eq!(config.max_health(UnitKind::Warship), 400);
        assert_eq!(config.max_health(UnitKind::MissileShip), MISSILE_SHIP_MAX_HEALTH);
        assert_eq!(config.rocket, GameConfig::default().rocket);
    }

    #[test]
    fn test_overrides_reject_invalid_values() {
        let err = GameConfig::with_overrides(r#"{ "warship": { "shell_attack_rate": 0 } }"#)
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "warship.shell_attack_rate",
                ..
            }
        ));

        let err = GameConfig::with_overrides(r#"{ "rocket": { "bomblet_count": 0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_overrides_reject_malformed_json() {
        let err = GameConfig::with_overrides("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_spawn_phase_window() {
        let config = GameConfig::with_overrides(r#"{ "spawn_phase_turns": 10 }"#).unwrap();
        assert!(config.in_spawn_phase(0));
        assert!(config.in_spawn_phase(9));
        assert!(!config.in_spawn_phase(10));
    }

    #[test]
    fn test_unit_kind_categories() {
        for kind in UnitKind::ALL {
            if kind.is_combat_target() {
                assert!(kind.is_naval(), "{kind:?} is a combat target but not a ship");
            }
            assert!(
                !(kind.is_structure() && kind.is_naval()),
                "{kind:?} cannot be both structure and ship"
            );
        }
        assert!(UnitKind::Shell.is_munition());
        assert!(!UnitKind::TradeShip.is_combat_target());
        assert!(UnitKind::TransportShip.is_combat_target());
    }

    #[test]
    fn test_tile_ref_bounds_checked() {
        assert_eq!(TileRef::new(15, 16).map(TileRef::index), Some(15));
        assert_eq!(TileRef::new(16, 16), None);
        assert_eq!(TileRef::new(0, 0), None);
    }

    #[test]
    fn test_owner_queries() {
        let nobody = Owner::TerraNullius;
        let p = Owner::from(PlayerId(3));
        assert!(!nobody.is_player());
        assert_eq!(nobody.player(), None);
        assert!(p.is_player());
        assert!(p.is(PlayerId(3)));
        assert!(!p.is(PlayerId(4)));
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = GameEvent::UnitCaptured {
            unit: UnitId(7),
            from: PlayerId(1),
            to: PlayerId(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""type":"UnitCaptured""#), "got {json}");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);

        let diag = DiagnosticKind::CarrierUnavailable {
            player: PlayerId(1),
            spawn: TileRef::new(12, 16).unwrap(),
        };
        let json = serde_json::to_string(&diag).unwrap();
        let back: DiagnosticKind = serde_json::from_str(&json).unwrap();
        assert_eq!(diag, back);
    }

    #[test]
    fn test_empty_snapshot_is_small() {
        let json = serde_json::to_string(&WorldSnapshot::default()).unwrap();
        assert!(json.len() < 256, "empty snapshot was {} bytes", json.len());
    }
}
