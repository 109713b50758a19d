use galaga_next::compute::init_state;
use galaga_next::entities::*;
use galaga_next::geometry::Rect;

#[test]
fn tier_values() {
    assert_eq!(Tier::Elite.hit_points(), 2);
    assert_eq!(Tier::Mid.hit_points(), 1);
    assert_eq!(Tier::Base.hit_points(), 1);

    assert!(Tier::Elite.score_value() > Tier::Mid.score_value());
    assert!(Tier::Mid.score_value() > Tier::Base.score_value());

    assert!(Tier::Elite.can_dive());
    assert!(Tier::Mid.can_dive());
    assert!(!Tier::Base.can_dive());
}

#[test]
fn boss_is_worth_the_most() {
    assert_eq!(EnemyKind::Boss.score_value(), BOSS_SCORE);
    assert!(EnemyKind::Boss.is_boss());
    assert!(!EnemyKind::Tier(Tier::Elite).is_boss());
    assert_eq!(
        EnemyKind::Tier(Tier::Base).score_value(),
        Tier::Base.score_value()
    );
}

#[test]
fn player_starts_centred_near_the_bottom() {
    let p = Player::at_start();
    assert_eq!(p.rect.x, PLAYFIELD_WIDTH / 2.0 - PLAYER_SIZE / 2.0);
    assert_eq!(p.rect.y, PLAYFIELD_HEIGHT - PLAYER_BOTTOM_OFFSET);
    assert_eq!(p.rect.width, PLAYER_SIZE);
}

#[test]
fn bullet_constructors_set_owner_and_direction() {
    let shot = Bullet::player(100.0, 50.0, 7.0);
    assert!(shot.from_player);
    assert!(shot.active);
    assert!(shot.vy < 0.0);
    assert_eq!(shot.rect.center_x(), 100.0);

    let drop = Bullet::enemy(100.0, 50.0, 0.0, 4.0);
    assert!(!drop.from_player);
    assert!(drop.vy > 0.0);
    assert_eq!(drop.rect.center_x(), 100.0);
}

#[test]
fn power_up_is_centred_on_drop_point() {
    let p = PowerUp::dropped_at(100.0, 200.0, PowerUpKind::Shield);
    assert_eq!(p.rect.center_x(), 100.0);
    assert_eq!(p.rect.center_y(), 200.0);
    assert!(p.active);
}

#[test]
fn hp_fraction() {
    let enemy = Enemy {
        rect: Rect::new(0.0, 0.0, 30.0, 30.0),
        origin: Point { x: 0.0, y: 0.0 },
        kind: EnemyKind::Boss,
        hp: 15,
        max_hp: 60,
        alive: true,
        diving: false,
        dive_phase: 0.0,
        dive_drift: 0.0,
    };
    assert_eq!(enemy.hp_fraction(), 0.25);
}

#[test]
fn double_fire_flag_follows_active_power_up() {
    let mut s = init_state(0);
    assert!(!s.double_fire_active());
    s.active_power_up = Some(ActivePowerUp {
        kind: PowerUpKind::DoubleFire,
        expires_at: 10,
    });
    assert!(s.double_fire_active());
}

#[test]
fn game_state_clone_is_independent() {
    let original = init_state(0);
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.x = 99.0;
    cloned.score = 999;
    cloned.bullets.push(Bullet::player(5.0, 5.0, 7.0));

    assert_eq!(original.player, Player::at_start());
    assert_eq!(original.score, 0);
    assert!(original.bullets.is_empty());
}
