//! Diesel repositories against an embedded PostgreSQL.
//!
//! Tests are synchronous and drive async calls through the harness runtime;
//! the embedded cluster bootstrap must not run inside a Tokio runtime.

use rstest::{fixture, rstest};
use serde_json::json;

use storefront::domain::ports::{
    OrderPersistenceError, OrderRepository, UserPersistenceError, UserRepository,
};
use storefront::domain::{EmailAddress, OrderDraft, SerializedProducts, UserId};
use storefront::outbound::persistence::{DieselOrderRepository, DieselUserRepository};

mod support;

use support::{PgHarness, handle_cluster_setup_failure, provision};

#[fixture]
fn harness() -> Option<PgHarness> {
    match provision() {
        Ok(harness) => Some(harness),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn products() -> SerializedProducts {
    SerializedProducts::encode(&json!([
        { "id": "1", "title": "mug", "price": 9.5, "quantity": 2, "description": "blue" }
    ]))
    .expect("encode")
}

#[rstest]
fn find_or_create_returns_the_same_user(harness: Option<PgHarness>) {
    let Some(harness) = harness else { return };
    let users = DieselUserRepository::new(harness.pool.clone());

    let first = harness
        .block_on(users.find_or_create(&email("vedovelli@gmail.com")))
        .expect("created");
    let second = harness
        .block_on(users.find_or_create(&email("vedovelli@gmail.com")))
        .expect("found");
    let all = harness.block_on(users.list_all()).expect("list");

    assert_eq!(first, second);
    assert_eq!(all, vec![first]);
}

#[rstest]
fn concurrent_find_or_create_yields_one_row(harness: Option<PgHarness>) {
    let Some(harness) = harness else { return };
    let users = DieselUserRepository::new(harness.pool.clone());
    let address = email("teste@gmail.com");

    let (a, b) = harness.block_on(async {
        tokio::join!(users.find_or_create(&address), users.find_or_create(&address))
    });
    let all = harness.block_on(users.list_all()).expect("list");

    assert_eq!(a.expect("first").id(), b.expect("second").id());
    assert_eq!(all.len(), 1);
}

#[rstest]
fn create_rejects_a_duplicate_email(harness: Option<PgHarness>) {
    let Some(harness) = harness else { return };
    let users = DieselUserRepository::new(harness.pool.clone());
    harness
        .block_on(users.create(&email("ada@example.com")))
        .expect("created");

    let err = harness
        .block_on(users.create(&email("ada@example.com")))
        .expect_err("duplicate");

    assert_eq!(err, UserPersistenceError::query("unique constraint violated"));
}

#[rstest]
fn orders_are_filtered_by_owner(harness: Option<PgHarness>) {
    let Some(harness) = harness else { return };
    let users = DieselUserRepository::new(harness.pool.clone());
    let orders = DieselOrderRepository::new(harness.pool.clone());
    let ada = harness
        .block_on(users.find_or_create(&email("ada@example.com")))
        .expect("ada");
    let bob = harness
        .block_on(users.find_or_create(&email("bob@example.com")))
        .expect("bob");

    let saved = harness
        .block_on(orders.insert(&OrderDraft {
            userid: ada.id(),
            products: products(),
        }))
        .expect("saved");

    assert_eq!(saved.userid, ada.id());
    assert_eq!(saved.products, products());
    assert_eq!(
        harness.block_on(orders.list_for_user(ada.id())).expect("ada orders"),
        vec![saved]
    );
    assert!(
        harness
            .block_on(orders.list_for_user(bob.id()))
            .expect("bob orders")
            .is_empty()
    );
}

#[rstest]
fn order_for_unknown_user_is_a_query_error(harness: Option<PgHarness>) {
    let Some(harness) = harness else { return };
    let orders = DieselOrderRepository::new(harness.pool.clone());

    let err = harness
        .block_on(orders.insert(&OrderDraft {
            userid: UserId::new(9999),
            products: products(),
        }))
        .expect_err("foreign key");

    assert_eq!(
        err,
        OrderPersistenceError::query("referenced record does not exist")
    );
}
