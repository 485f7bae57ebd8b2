mod common;

use std::sync::Arc;

use common::fixture;
use puck_roster::{Actor, MatchMode, PositionCategory, Position, RegistrationStatus, Team, UpsertOutcome, UpsertRequest};
use rand::seq::{IndexedRandom, SliceRandom};

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn only_one_player_gets_the_last_slot() {
    let f = fixture().await;
    // One forward slot per team.
    let game = f.game(Some(MatchMode::FourOnFour), Some(2)).await;
    let first = f.player("Early Bird", Position::WingLeft).await;
    f.app.ledger.upsert(Actor::Player(first.id), UpsertRequest::register(game.id, first.id)).await.unwrap();

    let racers = f.players("Racer", Position::WingRight, 2).await;
    let app = Arc::new(f.app);
    let mut handles = Vec::new();
    for player in &racers {
        let app = app.clone();
        let request = UpsertRequest::register(game.id, player.id);
        let actor = Actor::Player(player.id);
        handles.push(tokio::spawn(async move { app.ledger.upsert(actor, request).await }));
    }

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.push(handle.await.unwrap().unwrap().outcome);
    }
    assert_eq!(outcomes.iter().filter(|o| **o == UpsertOutcome::Granted).count(), 1);
    assert_eq!(outcomes.iter().filter(|o| **o == UpsertOutcome::Waitlisted).count(), 1);

    let occupancy = app.ledger.occupancy(game.id).await.unwrap();
    assert_eq!(occupancy.count(Team::Dark, PositionCategory::Forward), 1);
    assert_eq!(occupancy.count(Team::Light, PositionCategory::Forward), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn simultaneous_registrations_never_overfill() {
    let f = fixture().await;
    let game = f.game(Some(MatchMode::FourOnFourWithGoalie), None).await;

    let positions = [Position::Goalie, Position::Center, Position::WingLeft, Position::DefenseRight, Position::Defense, Position::Any];
    let picks: Vec<Position> = {
        let mut rng = rand::rng();
        (0..40).map(|_| *positions.choose(&mut rng).unwrap()).collect()
    };

    let mut players = Vec::new();
    for (i, position) in picks.into_iter().enumerate() {
        players.push(f.player(&format!("Player {i}"), position).await);
    }
    players.shuffle(&mut rand::rng());

    let app = Arc::new(f.app);
    let mut handles = Vec::new();
    for player in players {
        let app = app.clone();
        let request = UpsertRequest::register(game.id, player.id);
        handles.push(tokio::spawn(async move { app.ledger.upsert(Actor::Player(player.id), request).await }));
    }

    let mut granted = 0;
    for handle in handles {
        if handle.await.unwrap().unwrap().outcome == UpsertOutcome::Granted {
            granted += 1;
        }
    }

    let occupancy = app.ledger.occupancy(game.id).await.unwrap();
    assert_eq!(occupancy.total(), granted);
    assert!(occupancy.total() <= game.hard_total());
    for team in Team::ALL {
        for category in [PositionCategory::Goalie, PositionCategory::Defense, PositionCategory::Forward] {
            assert!(occupancy.count(team, category) <= game.category_capacity(category));
        }
    }

    let registered = app.ledger.with_status(game.id, RegistrationStatus::Registered).await.unwrap();
    let waiting = app.ledger.with_status(game.id, RegistrationStatus::Reserved).await.unwrap();
    assert_eq!(registered.len() + waiting.len(), 40);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn withdrawal_racing_a_registration_ends_with_the_newcomer_in() {
    let f = fixture().await;
    let game = f.game(Some(MatchMode::FourOnFour), Some(2)).await;
    let regulars = f.players("Regular", Position::Forward, 2).await;
    for player in &regulars {
        f.app.ledger.upsert(Actor::Player(player.id), UpsertRequest::register(game.id, player.id)).await.unwrap();
    }
    let newcomer = f.player("Newcomer", Position::Forward).await;
    let leaving = regulars[0].id;
    let match_id = game.id;

    let app = Arc::new(f.app);
    let withdraw = {
        let app = app.clone();
        tokio::spawn(async move { app.ledger.upsert(Actor::Player(leaving), UpsertRequest::unregister(match_id, leaving)).await })
    };
    let join = {
        let app = app.clone();
        let id = newcomer.id;
        tokio::spawn(async move { app.ledger.upsert(Actor::Player(id), UpsertRequest::register(match_id, id)).await })
    };
    withdraw.await.unwrap().unwrap();
    join.await.unwrap().unwrap();

    assert_eq!(app.ledger.status_of(game.id, newcomer.id).await.unwrap(), RegistrationStatus::Registered);
    assert_eq!(app.ledger.status_of(game.id, leaving).await.unwrap(), RegistrationStatus::Unregistered);
    assert_eq!(app.ledger.occupancy(game.id).await.unwrap().total(), 2);
}
