// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use agora::actors::{ActorKind, Deployable, comment, post};
use agora::address::Address;
use agora::econ::TokenAmount;
use agora::error::ExitCode;
use agora::interpreter::TransactionFilter;

use crate::common::Harness;

/// Alice and bob are registered and alice has one post.
fn with_post() -> (Harness, Address, Address) {
    let mut h = Harness::new();
    let alice = h.wallet("alice");
    let bob = h.wallet("bob");
    h.init_user(alice, "alice");
    h.init_user(bob, "bob");
    assert!(h.create_post(alice, "first").all_successful());
    (h, alice, bob)
}

#[test]
fn post_is_initialized_by_its_authors_user() {
    let (h, alice, _) = with_post();
    let st = h.post_state(alice, 0);
    assert!(st.initialized);
    assert_eq!(st.master_address, h.master_address());
    assert_eq!(st.author_address, alice);
    assert_eq!(st.post_index, 0);
    assert_eq!(st.title, "first");
    assert_eq!(st.text, "first, the long version");
    assert_eq!(
        (st.likes_count, st.comments_index, st.likes_paid, st.comments_paid),
        (0, 0, 0, 0)
    );
}

#[test]
fn only_the_matching_user_actor_may_init_a_post() {
    let (mut h, alice, bob) = with_post();
    let ctor = post::ConstructorParams {
        master: h.master_address(),
        author: alice,
        post_index: 5,
    };
    let params = post::InitPostParams {
        query_id: 1,
        title: "forged".into(),
        text: "forged".into(),
    };

    for sender in [alice, bob, h.user_address(bob)] {
        let res = h
            .ledger
            .deploy(
                &sender,
                &ctor,
                post::Method::InitPost as u64,
                &params,
                TokenAmount::zero(),
            )
            .unwrap();
        assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_FORBIDDEN);
        assert!(!h.post_state(alice, 5).initialized);
    }
}

#[test]
fn reinitializing_a_post_is_rejected() {
    let (mut h, alice, _) = with_post();
    let before = h.post_state(alice, 0);
    let ctor = post::ConstructorParams {
        master: h.master_address(),
        author: alice,
        post_index: 0,
    };
    // Replay the init as if it came from alice's user actor again.
    let user_addr = h.user_address(alice);
    let res = h
        .ledger
        .deploy(
            &user_addr,
            &ctor,
            post::Method::InitPost as u64,
            &post::InitPostParams {
                query_id: 9,
                title: "again".into(),
                text: "again".into(),
            },
            TokenAmount::zero(),
        )
        .unwrap();
    let tx = res.first().unwrap();
    assert_eq!(tx.exit_code, ExitCode::USR_ILLEGAL_STATE);
    assert!(!tx.deployed);
    assert_eq!(h.post_state(alice, 0), before);
    assert_eq!(h.ledger.kind_of(&ctor.address().unwrap()), Some(ActorKind::Post));
}

#[test]
fn likes_accumulate_one_per_message() {
    let (mut h, alice, bob) = with_post();
    for expected in 1..=3 {
        let res = h.like(bob, alice, 0);
        assert!(res.all_successful(), "{res:?}");
        assert_eq!(h.post_state(alice, 0).likes_count, expected);
    }
    // Authors may like their own posts too.
    assert!(h.like(alice, alice, 0).all_successful());
    assert_eq!(h.post_state(alice, 0).likes_count, 4);
}

#[test]
fn spoofed_notifications_are_rejected() {
    let (mut h, alice, bob) = with_post();
    let post_addr = h.post_address(alice, 0);

    let res = h
        .ledger
        .invoke(
            &bob,
            &post_addr,
            post::Method::PostLiked as u64,
            &post::PostLikedParams {
                query_id: 1,
                user: bob,
            },
            TokenAmount::zero(),
        )
        .unwrap();
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_FORBIDDEN);

    let res = h
        .ledger
        .invoke(
            &bob,
            &post_addr,
            post::Method::PostCommented as u64,
            &post::PostCommentedParams {
                query_id: 2,
                user: bob,
                text: "spam".into(),
            },
            TokenAmount::zero(),
        )
        .unwrap();
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_FORBIDDEN);

    let st = h.post_state(alice, 0);
    assert_eq!((st.likes_count, st.comments_index), (0, 0));
}

#[test]
fn comments_deploy_comment_actors_in_order() {
    let (mut h, alice, bob) = with_post();
    let res = h.comment(bob, alice, 0, "nice");
    assert!(res.all_successful(), "{res:?}");
    assert_eq!(res.transactions.len(), 3);
    assert!(h.comment(alice, alice, 0, "thanks").all_successful());
    assert_eq!(h.post_state(alice, 0).comments_index, 2);

    let first = comment::ConstructorParams {
        master: h.master_address(),
        author: alice,
        commenter: bob,
        post_index: 0,
        comment_index: 0,
    }
    .address()
    .unwrap();
    assert!(res.has(&TransactionFilter::new().to(first).deployed(true)));
    let st: comment::State = h.ledger.get_state(&first).unwrap();
    assert!(st.initialized);
    assert_eq!(st.text, "nice");
    assert_eq!(st.commenter_address, bob);
    assert_eq!(st.comment_index, 0);
}

#[test]
fn interactions_with_a_missing_post_change_nothing() {
    let (mut h, alice, bob) = with_post();
    let res = h.comment(bob, alice, 1, "hello?");
    assert!(!res.all_successful());
    assert!(h.ledger.code_of(&h.post_address(alice, 1)).is_none());
    assert_eq!(h.post_state(alice, 0).comments_index, 0);
}

#[test]
fn only_the_author_may_claim() {
    let (mut h, alice, bob) = with_post();
    h.like(bob, alice, 0);
    let post_addr = h.post_address(alice, 0);
    let res = h
        .ledger
        .invoke(
            &bob,
            &post_addr,
            post::Method::InitClaimPayment as u64,
            &post::InitClaimPaymentParams { query_id: 1 },
            TokenAmount::zero(),
        )
        .unwrap();
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_FORBIDDEN);
    assert_eq!(h.post_state(alice, 0).likes_paid, 0);
}

#[test]
fn claiming_with_nothing_new_fails() {
    let (mut h, alice, _) = with_post();
    let res = h.claim(alice, 0);
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_ILLEGAL_STATE);
    assert_eq!(res.transactions.len(), 1);
}
