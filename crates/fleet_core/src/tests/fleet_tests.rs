use super::*;

fn at(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).expect("time")
}

fn boat(fleet: &Fleet, id: i64) -> &Boat {
    fleet.boat(BoatId(id)).expect("boat")
}

#[test]
fn initial_layout_is_three_boats_per_scene() {
    let fleet = Fleet::new(21);
    assert_eq!(fleet.len(), 21);

    assert_eq!(boat(&fleet, 1).scene(), Scene::Scene1);
    assert_eq!(boat(&fleet, 1).phase(), Phase::Start);
    assert_eq!(boat(&fleet, 5).scene(), Scene::Scene2);
    assert_eq!(boat(&fleet, 5).phase(), Phase::In);
    assert_eq!(boat(&fleet, 18).scene(), Scene::Scene6);
    assert_eq!(boat(&fleet, 18).phase(), Phase::End);
    assert_eq!(boat(&fleet, 21).scene(), Scene::LoadingBay);

    assert!(fleet
        .boats()
        .iter()
        .all(|b| b.is_active() && b.is_running() && b.history().is_empty()));
}

#[test]
fn oversized_fleet_wraps_initial_scene() {
    let fleet = Fleet::new(24);
    assert_eq!(boat(&fleet, 22).scene(), Scene::Scene1);
    assert_eq!(boat(&fleet, 24).phase(), Phase::End);
}

#[test]
fn unknown_ids_are_not_addressable() {
    let fleet = Fleet::new(3);
    assert!(fleet.boat(BoatId(0)).is_none());
    assert!(fleet.boat(BoatId(4)).is_none());
    assert!(fleet.boat(BoatId(-2)).is_none());
}

#[test]
fn advance_moves_non_terminal_phase_forward_with_one_entry() {
    let mut fleet = Fleet::new(21);

    let moved = fleet.advance(at(10, 0, 5));

    assert_eq!(moved.len(), 21);
    let first = boat(&fleet, 1);
    assert_eq!(first.scene(), Scene::Scene1);
    assert_eq!(first.phase(), Phase::In);
    assert_eq!(first.history().len(), 1);
    assert_eq!(first.history()[0].to_string(), "[10:00:05] In - Scene 1");
}

#[test]
fn advance_from_terminal_phase_moves_to_next_scene() {
    let mut fleet = Fleet::new(21);

    fleet.advance(at(10, 0, 0));

    let third = boat(&fleet, 3);
    assert_eq!(third.scene(), Scene::Scene2);
    assert_eq!(third.phase(), Phase::Start);
    assert_eq!(third.history()[0].to_string(), "[10:00:00] Start - Scene 2");
}

#[test]
fn loading_bay_wraps_to_scene_one() {
    let mut fleet = Fleet::new(21);
    assert_eq!(boat(&fleet, 21).scene(), Scene::LoadingBay);
    assert_eq!(boat(&fleet, 21).phase(), Phase::End);

    fleet.advance(at(10, 0, 0));

    assert_eq!(boat(&fleet, 21).scene(), Scene::Scene1);
    assert_eq!(boat(&fleet, 21).phase(), Phase::Start);
}

#[test]
fn full_cycle_returns_boat_to_its_start() {
    let mut fleet = Fleet::new(1);
    for _ in 0..(Scene::ALL.len() * Phase::ALL.len()) {
        fleet.advance(at(10, 0, 0));
    }
    assert_eq!(boat(&fleet, 1).scene(), Scene::Scene1);
    assert_eq!(boat(&fleet, 1).phase(), Phase::Start);
    assert_eq!(boat(&fleet, 1).history().len(), 21);
}

#[test]
fn advance_skips_stopped_and_removed_boats() {
    let mut fleet = Fleet::new(6);
    fleet.stop(BoatId(2));
    fleet.remove(BoatId(4));
    let before_stopped = boat(&fleet, 2).clone();
    let before_removed = boat(&fleet, 4).clone();

    let moved = fleet.advance(at(10, 0, 0));

    assert!(!moved.contains(&BoatId(2)));
    assert!(!moved.contains(&BoatId(4)));
    assert_eq!(moved.len(), 4);
    assert_eq!(boat(&fleet, 2), &before_stopped);
    assert_eq!(boat(&fleet, 4), &before_removed);
}

#[test]
fn snapshot_mirrors_boat_state() {
    let mut fleet = Fleet::new(2);
    fleet.stop(BoatId(2));
    fleet.advance(at(8, 30, 0));

    let snapshot = fleet.snapshot();
    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot[0].phase, Phase::In);
    assert_eq!(snapshot[0].history.len(), 1);
    assert_eq!(snapshot[1].status(), BoatStatus::Stopped);
    assert!(snapshot[1].history.is_empty());
}
