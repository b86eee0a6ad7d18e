// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::io::Write;

use clap::Subcommand;

use crate::actors::{Deployable, comment, master, post, user};
use crate::address::Address;
use crate::econ::TokenAmount;

/// Every actor address is a pure function of its code and constructor parameters, so
/// these commands need no ledger.
#[derive(Debug, Subcommand)]
pub enum AddressCommands {
    /// Address of a named treasury wallet
    Wallet { name: String },
    /// Address of a Master actor
    Master {
        /// Administrator account
        admin: Address,
        /// Price paid per like, in tokens
        price_for_like: TokenAmount,
        /// Price paid per comment, in tokens
        price_for_comment: TokenAmount,
        #[arg(long, default_value_t = master::VotePolicy::AllowRepeat)]
        vote_policy: master::VotePolicy,
    },
    /// Address of the User actor of an owner account
    User { master: Address, owner: Address },
    /// Address of a Post actor
    Post {
        master: Address,
        author: Address,
        post_index: u64,
    },
    /// Address of a Comment actor
    Comment {
        master: Address,
        author: Address,
        commenter: Address,
        post_index: u64,
        comment_index: u64,
    },
}

impl AddressCommands {
    pub fn run<W: Write>(self, sink: &mut W) -> anyhow::Result<()> {
        let address = self.derive()?;
        writeln!(sink, "{address}")?;
        Ok(())
    }

    fn derive(self) -> anyhow::Result<Address> {
        let address = match self {
            Self::Wallet { name } => Address::new_wallet(&name),
            Self::Master {
                admin,
                price_for_like,
                price_for_comment,
                vote_policy,
            } => master::ConstructorParams {
                admin,
                price_for_like,
                price_for_comment,
                vote_policy,
            }
            .address()?,
            Self::User { master, owner } => user::ConstructorParams { master, owner }.address()?,
            Self::Post {
                master,
                author,
                post_index,
            } => post::ConstructorParams {
                master,
                author,
                post_index,
            }
            .address()?,
            Self::Comment {
                master,
                author,
                commenter,
                post_index,
                comment_index,
            } => comment::ConstructorParams {
                master,
                author,
                commenter,
                post_index,
                comment_index,
            }
            .address()?,
        };
        Ok(address)
    }
}
