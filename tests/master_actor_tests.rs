// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod common;

use agora::actors::{ActorKind, master};
use agora::econ::TokenAmount;
use agora::error::ExitCode;

use crate::common::{Harness, tokens};

fn deploy_master(h: &mut Harness, from: agora::address::Address) -> ExitCode {
    let query_id = h.query_id();
    let ctor = h.master.clone();
    h.ledger
        .deploy(
            &from,
            &ctor,
            master::Method::Deploy as u64,
            &master::DeployParams { query_id },
            TokenAmount::zero(),
        )
        .unwrap()
        .first()
        .unwrap()
        .exit_code
}

#[test]
fn deploy_initializes_the_master() {
    let h = Harness::new();
    let st = h.master_state();
    assert!(st.initialized);
    assert_eq!(st.admin_address, h.admin);
    assert_eq!(st.price_for_like, tokens("0.05"));
    assert_eq!(st.price_for_comment, tokens("0.15"));
    assert!(!st.voting.active);
    assert_eq!(h.ledger.kind_of(&h.master_address()), Some(ActorKind::Master));
}

#[test]
fn second_deploy_is_rejected_and_keeps_state() {
    let mut h = Harness::new();
    let admin = h.admin;
    assert!(h.start_voting(admin, "1", "1").all_successful());
    let before = h.master_state();

    assert_eq!(deploy_master(&mut h, admin), ExitCode::USR_ILLEGAL_STATE);
    assert_eq!(h.master_state(), before);
}

#[test]
fn only_the_admin_deploys() {
    let mut h = Harness::undeployed();
    let mallory = h.wallet("mallory");

    assert_eq!(deploy_master(&mut h, mallory), ExitCode::USR_FORBIDDEN);
    assert!(!h.master_state().initialized);

    let admin = h.admin;
    assert_eq!(deploy_master(&mut h, admin), ExitCode::OK);
    assert!(h.master_state().initialized);
}

#[test]
fn master_rejects_everything_before_deploy() {
    let mut h = Harness::undeployed();
    let admin = h.admin;
    let alice = h.wallet("alice");

    // Reaching an absent master deploys it, uninitialized.
    let query_id = h.query_id();
    let ctor = h.master.clone();
    let res = h
        .ledger
        .deploy(
            &admin,
            &ctor,
            master::Method::StartVoting as u64,
            &master::StartVotingParams {
                query_id,
                new_price_for_like: tokens("1"),
                new_price_for_comment: tokens("1"),
            },
            TokenAmount::zero(),
        )
        .unwrap();
    let tx = res.first().unwrap();
    assert!(tx.deployed);
    assert_eq!(tx.exit_code, ExitCode::USR_ILLEGAL_STATE);
    assert!(!h.master_state().voting.active);

    assert_eq!(
        h.start_voting(admin, "1", "1").first().unwrap().exit_code,
        ExitCode::USR_ILLEGAL_STATE
    );
    assert_eq!(
        h.end_voting(alice).first().unwrap().exit_code,
        ExitCode::USR_ILLEGAL_STATE
    );

    // Users and posts never talk to the master on init, so both can exist already.
    assert!(h.init_user(alice, "alice").all_successful());
    assert!(h.create_post(alice, "early").all_successful());
    let master_addr = h.master_address();

    let user_addr = h.user_address(alice);
    let res = h
        .ledger
        .invoke(
            &user_addr,
            &master_addr,
            master::Method::Vote as u64,
            &master::VoteParams {
                query_id: 1,
                user: alice,
                vote: true,
            },
            TokenAmount::zero(),
        )
        .unwrap();
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_ILLEGAL_STATE);

    let post_addr = h.post_address(alice, 0);
    let res = h
        .ledger
        .invoke(
            &post_addr,
            &master_addr,
            master::Method::ClaimPayment as u64,
            &master::ClaimPaymentParams {
                query_id: 1,
                author: alice,
                comments_count: 1,
                likes_count: 1,
                post_index: 0,
            },
            TokenAmount::zero(),
        )
        .unwrap();
    assert_eq!(res.first().unwrap().exit_code, ExitCode::USR_ILLEGAL_STATE);

    let st = h.master_state();
    assert!(!st.initialized);
    assert_eq!((st.voting.yes_count, st.voting.no_count), (0, 0));
}

#[test]
fn top_ups_are_accepted_from_anyone() {
    let mut h = Harness::new();
    let alice = h.wallet("alice");
    let master_addr = h.master_address();
    let before = h.ledger.balance(&master_addr);
    let res = h
        .ledger
        .send(agora::message::Message::transfer(alice, master_addr, tokens("2")))
        .unwrap();
    assert!(res.all_successful());
    assert_eq!(h.ledger.balance(&master_addr), &before + &tokens("2"));
}
