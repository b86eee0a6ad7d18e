// Copyright 2019-2026 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::VecDeque;

use anyhow::{Context as _, bail, ensure};
use cid::Cid;
use fvm_ipld_encoding::RawBytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::LedgerConfig;
use super::default_runtime::{DefaultRuntime, VMMsg};
use crate::actor_error;
use crate::actors::{ActorKind, Deployable, account, comment, master, post, user};
use crate::address::{Address, StateInit};
use crate::clock::{Timestamp, wall_clock};
use crate::econ::TokenAmount;
use crate::error::{ActorError, ExitCode};
use crate::message::{METHOD_SEND, Message, MethodNum};
use crate::runtime::ActorCode;
use crate::state_tree::{ActorState, StateTree};

/// Receipt of one delivered message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Logical time: position of this delivery in the ledger's history.
    pub lt: u64,
    pub from: Address,
    pub to: Address,
    pub value: TokenAmount,
    pub method_num: MethodNum,
    /// Whether this delivery created the recipient.
    pub deployed: bool,
    pub exit_code: ExitCode,
    /// Whether the value came back to the sender.
    pub bounced: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Transaction {
    fn new(lt: u64, msg: &Message) -> Self {
        Self {
            lt,
            from: msg.from,
            to: msg.to,
            value: msg.value.clone(),
            method_num: msg.method_num,
            deployed: false,
            exit_code: ExitCode::OK,
            bounced: false,
            error: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.exit_code.is_success()
    }
}

/// Partial description of a [`Transaction`]; unset fields match anything.
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    from: Option<Address>,
    to: Option<Address>,
    method_num: Option<MethodNum>,
    value: Option<TokenAmount>,
    exit_code: Option<ExitCode>,
    success: Option<bool>,
    deployed: Option<bool>,
    bounced: Option<bool>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn to(mut self, to: Address) -> Self {
        self.to = Some(to);
        self
    }

    pub fn method_num(mut self, method_num: MethodNum) -> Self {
        self.method_num = Some(method_num);
        self
    }

    pub fn value(mut self, value: TokenAmount) -> Self {
        self.value = Some(value);
        self
    }

    pub fn exit_code(mut self, exit_code: ExitCode) -> Self {
        self.exit_code = Some(exit_code);
        self
    }

    pub fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn deployed(mut self, deployed: bool) -> Self {
        self.deployed = Some(deployed);
        self
    }

    pub fn bounced(mut self, bounced: bool) -> Self {
        self.bounced = Some(bounced);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        fn check<T: PartialEq>(want: Option<&T>, got: &T) -> bool {
            want.is_none_or(|w| w == got)
        }
        check(self.from.as_ref(), &tx.from)
            && check(self.to.as_ref(), &tx.to)
            && check(self.method_num.as_ref(), &tx.method_num)
            && check(self.value.as_ref(), &tx.value)
            && check(self.exit_code.as_ref(), &tx.exit_code)
            && check(self.success.as_ref(), &tx.is_success())
            && check(self.deployed.as_ref(), &tx.deployed)
            && check(self.bounced.as_ref(), &tx.bounced)
    }
}

/// Every transaction produced while draining the queue after one external message.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendResult {
    pub transactions: Vec<Transaction>,
}

impl SendResult {
    pub fn find(&self, filter: &TransactionFilter) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| filter.matches(tx))
    }

    pub fn has(&self, filter: &TransactionFilter) -> bool {
        self.find(filter).is_some()
    }

    pub fn count(&self, filter: &TransactionFilter) -> usize {
        self.transactions.iter().filter(|tx| filter.matches(tx)).count()
    }

    pub fn all_successful(&self) -> bool {
        self.transactions.iter().all(Transaction::is_success)
    }

    /// The transaction of the external message itself.
    pub fn first(&self) -> Option<&Transaction> {
        self.transactions.first()
    }
}

/// In-process ledger hosting the protocol actors.
///
/// Messages are delivered strictly one at a time from a single FIFO queue. Cloning a
/// ledger takes a snapshot; assigning the clone back restores it.
#[derive(Clone, Debug)]
pub struct Ledger {
    config: LedgerConfig,
    state: StateTree,
    now: Timestamp,
    lt: u64,
}

impl Ledger {
    pub fn new(config: LedgerConfig) -> Self {
        let now = config.genesis_time.unwrap_or_else(wall_clock);
        Self {
            config,
            state: StateTree::new(),
            now,
            lt: 0,
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn state_tree(&self) -> &StateTree {
        &self.state
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn set_now(&mut self, now: Timestamp) {
        self.now = now;
    }

    pub fn advance(&mut self, seconds: Timestamp) {
        self.now = self.now.saturating_add(seconds);
    }

    /// Returns the wallet named `name`, creating it with the configured treasury balance.
    pub fn treasury(&mut self, name: &str) -> Address {
        let addr = Address::new_wallet(name);
        if !self.state.contains(&addr) {
            debug!(wallet = name, address = %addr, "creating treasury wallet");
            self.state.set_actor(
                addr,
                ActorState::new_account(self.config.treasury_balance.clone()),
            );
        }
        addr
    }

    pub fn balance(&self, addr: &Address) -> TokenAmount {
        self.state
            .get_actor(addr)
            .map(|a| a.balance.clone())
            .unwrap_or_default()
    }

    pub fn code_of(&self, addr: &Address) -> Option<Cid> {
        self.state.get_actor(addr).map(|a| a.code)
    }

    pub fn kind_of(&self, addr: &Address) -> Option<ActorKind> {
        self.state.get_actor(addr).and_then(ActorState::kind)
    }

    /// Decodes the full state record of the actor at `addr`.
    pub fn get_state<S: DeserializeOwned>(&self, addr: &Address) -> anyhow::Result<S> {
        let actor = self
            .state
            .get_actor(addr)
            .with_context(|| format!("no actor at {addr}"))?;
        actor
            .state
            .deserialize()
            .with_context(|| format!("failed to decode state of {addr}"))
    }

    /// Sends an external message from a wallet and processes everything it triggers.
    pub fn send(&mut self, msg: Message) -> anyhow::Result<SendResult> {
        let sender = self
            .state
            .get_actor_mut(&msg.from)
            .with_context(|| format!("sender {} does not exist", msg.from))?;
        ensure!(
            sender.deduct_funds(&msg.value),
            "sender {} cannot cover {}",
            msg.from,
            msg.value
        );

        let mut queue = VecDeque::from([msg]);
        let mut transactions = Vec::new();
        while let Some(msg) = queue.pop_front() {
            if transactions.len() >= self.config.max_transactions {
                for undelivered in std::iter::once(msg).chain(queue) {
                    if !undelivered.value.is_zero() {
                        self.refund(&undelivered);
                    }
                }
                bail!(
                    "message chain exceeded {} transactions",
                    self.config.max_transactions
                );
            }
            self.lt += 1;
            let (tx, outbound) = self.apply_message(msg);
            transactions.push(tx);
            queue.extend(outbound);
        }
        Ok(SendResult { transactions })
    }

    /// Sends typed parameters to an existing actor.
    pub fn invoke<P: Serialize>(
        &mut self,
        from: &Address,
        to: &Address,
        method: MethodNum,
        params: &P,
        value: TokenAmount,
    ) -> anyhow::Result<SendResult> {
        let msg = Message::new_typed(*from, *to, method, params)
            .context("failed to encode parameters")?
            .with_value(value);
        self.send(msg)
    }

    /// Sends typed parameters to the actor described by `ctor`, deploying it if needed.
    pub fn deploy<D: Deployable, P: Serialize>(
        &mut self,
        from: &Address,
        ctor: &D,
        method: MethodNum,
        params: &P,
        value: TokenAmount,
    ) -> anyhow::Result<SendResult> {
        let init = ctor.state_init()?;
        let params = RawBytes::serialize(params).context("failed to encode parameters")?;
        self.send(Message::deploying(*from, init, method, params).with_value(value))
    }

    fn apply_message(&mut self, msg: Message) -> (Transaction, Vec<Message>) {
        let mut tx = Transaction::new(self.lt, &msg);

        if let Err(err) = self.resolve_receiver(&msg, &mut tx) {
            return (self.abort(tx, &msg, err, false), Vec::new());
        }
        if let Some(actor) = self.state.get_actor_mut(&msg.to) {
            actor.deposit_funds(&msg.value);
        }

        match self.invoke_receiver(&msg) {
            Ok(outbound) => {
                debug!(
                    lt = tx.lt,
                    from = %msg.from.short(),
                    to = %msg.to.short(),
                    method = msg.method_num,
                    value = %msg.value,
                    outbound = outbound.len(),
                    "applied message"
                );
                (tx, outbound)
            }
            Err(err) => (self.abort(tx, &msg, err, true), Vec::new()),
        }
    }

    /// Makes sure the recipient exists, deploying it from the attached [`StateInit`].
    fn resolve_receiver(&mut self, msg: &Message, tx: &mut Transaction) -> Result<(), ActorError> {
        if let Some(init) = &msg.state_init {
            let derived = init.address();
            if derived != msg.to {
                return Err(actor_error!(illegal_actor;
                    "state init deploys to {} but message is addressed to {}", derived, msg.to));
            }
        }
        if self.state.contains(&msg.to) {
            return Ok(());
        }

        match &msg.state_init {
            Some(init) => self.deploy_actor(&msg.to, init)?,
            None if msg.method_num == METHOD_SEND => {
                debug!(address = %msg.to, "creating account for plain transfer");
                self.state
                    .set_actor(msg.to, ActorState::new_account(TokenAmount::zero()));
            }
            None => {
                return Err(ActorError::unchecked(
                    ExitCode::SYS_INVALID_RECEIVER,
                    format!("actor {} does not exist", msg.to),
                ));
            }
        }
        tx.deployed = true;
        Ok(())
    }

    fn deploy_actor(&mut self, addr: &Address, init: &StateInit) -> Result<(), ActorError> {
        let kind = ActorKind::from_code(&init.code)
            .ok_or_else(|| actor_error!(illegal_actor; "unknown actor code {}", init.code))?;
        let state = initial_state(kind, &init.data).map_err(|e| {
            actor_error!(illegal_actor; "invalid {} constructor parameters: {}", kind, e.msg())
        })?;
        self.state
            .set_actor(*addr, ActorState::new(init.code, state, TokenAmount::zero()));
        info!(%kind, address = %addr, "deployed actor");
        Ok(())
    }

    /// Runs the recipient's code and commits its effects if it succeeds.
    fn invoke_receiver(&mut self, msg: &Message) -> Result<Vec<Message>, ActorError> {
        let actor = self.state.get_actor(&msg.to).ok_or_else(|| {
            ActorError::unchecked(
                ExitCode::SYS_INVALID_RECEIVER,
                format!("actor {} does not exist", msg.to),
            )
        })?;
        let kind = actor
            .kind()
            .ok_or_else(|| actor_error!(illegal_actor; "unknown actor code {}", actor.code))?;

        let vm_msg = VMMsg {
            caller: msg.from,
            receiver: msg.to,
            value_received: msg.value.clone(),
        };
        let mut rt = DefaultRuntime::new(vm_msg, self.now, actor.state.clone());
        invoke(kind, &mut rt, msg.method_num, &msg.params)?;
        if !rt.caller_validated() {
            return Err(actor_error!(illegal_actor; "Caller MUST be validated during method execution"));
        }

        let (state, outbound) = rt.into_effects();
        let required: TokenAmount = outbound.iter().map(|m| &m.value).sum();
        let actor = self.state.get_actor_mut(&msg.to).ok_or_else(|| {
            ActorError::unchecked(
                ExitCode::SYS_INVALID_RECEIVER,
                format!("actor {} does not exist", msg.to),
            )
        })?;
        if !actor.deduct_funds(&required) {
            return Err(ActorError::unchecked(
                ExitCode::SYS_INSUFFICIENT_FUNDS,
                format!(
                    "outbound value {} exceeds balance {}",
                    required, actor.balance
                ),
            ));
        }
        actor.state = state;
        Ok(outbound)
    }

    /// Records a failed delivery and refunds the value where it has to go back.
    ///
    /// A value that never reached the recipient always returns to the sender; a value
    /// that did is refunded only for bounceable messages. A deployment made by the
    /// failed delivery stays in place.
    fn abort(&mut self, mut tx: Transaction, msg: &Message, err: ActorError, credited: bool) -> Transaction {
        if err.exit_code().is_system_error() {
            warn!(lt = tx.lt, to = %msg.to, exit_code = %err.exit_code(), "{}", err.msg());
        } else {
            debug!(lt = tx.lt, to = %msg.to, exit_code = %err.exit_code(), "{}", err.msg());
        }
        tx.exit_code = err.exit_code();
        tx.error = Some(err.msg().to_owned());

        if msg.value.is_zero() || (credited && !msg.bounce) {
            return tx;
        }
        if credited
            && !self
                .state
                .get_actor_mut(&msg.to)
                .is_some_and(|actor| actor.deduct_funds(&msg.value))
        {
            return tx;
        }
        self.refund(msg);
        tx.bounced = true;
        tx
    }

    /// Returns the value carried by `msg` to its sender.
    fn refund(&mut self, msg: &Message) {
        match self.state.get_actor_mut(&msg.from) {
            Some(sender) => sender.deposit_funds(&msg.value),
            None => self
                .state
                .set_actor(msg.from, ActorState::new_account(msg.value.clone())),
        }
    }
}

fn invoke(
    kind: ActorKind,
    rt: &mut DefaultRuntime,
    method: MethodNum,
    params: &RawBytes,
) -> Result<(), ActorError> {
    match kind {
        ActorKind::Account => account::Actor::invoke_method(rt, method, params),
        ActorKind::Master => master::Actor::invoke_method(rt, method, params),
        ActorKind::User => user::Actor::invoke_method(rt, method, params),
        ActorKind::Post => post::Actor::invoke_method(rt, method, params),
        ActorKind::Comment => comment::Actor::invoke_method(rt, method, params),
    }
}

fn initial_state(kind: ActorKind, data: &RawBytes) -> Result<RawBytes, ActorError> {
    match kind {
        ActorKind::Account => account::Actor::initial_state(data),
        ActorKind::Master => master::Actor::initial_state(data),
        ActorKind::User => user::Actor::initial_state(data),
        ActorKind::Post => post::Actor::initial_state(data),
        ActorKind::Comment => comment::Actor::initial_state(data),
    }
}
