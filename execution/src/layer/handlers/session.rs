use super::super::*;

impl<'a, S: State, E: Entropy> Layer<'a, S, E> {
    pub(in crate::layer) async fn handle_create_session(
        &mut self,
        session_id: &SessionId,
    ) -> Result<Output, SlotsError> {
        if load_session(self, session_id).await?.is_some() {
            return Err(SlotsError::Internal(format!(
                "session {session_id} already exists"
            )));
        }

        let session = Session::new(*session_id, self.now);
        let created = SessionCreated::from(&session);
        self.insert(Key::Session(*session_id), Value::Session(session));
        info!(session = %session_id, credits = created.credits, "session created");

        Ok(Output::SessionCreated(created))
    }

    pub(in crate::layer) async fn handle_play_roll(
        &mut self,
        session_id: &SessionId,
    ) -> Result<Output, SlotsError> {
        let mut session = self.load_active_session(session_id).await?;

        let mut rng = self.entropy.roll_rng(session_id, session.roll_count);
        let record = play(&mut session, &mut rng, self.now)?;
        debug!(
            session = %session_id,
            roll = record.index,
            won = record.credits_won,
            rerolled = record.was_rerolled,
            credits = record.credits_after,
            "roll played"
        );

        let outcome = RollOutcome::from(&record);
        self.insert(Key::Roll(*session_id, record.index), Value::Roll(record));
        self.insert(Key::Session(*session_id), Value::Session(session));

        Ok(Output::Roll(outcome))
    }

    pub(in crate::layer) async fn handle_cash_out(
        &mut self,
        session_id: &SessionId,
    ) -> Result<Output, SlotsError> {
        let mut session = self.load_active_session(session_id).await?;

        let cashed_out = session.credits;
        let total = session.cash_out(self.now);
        let receipt = CashOutReceipt::new(total, cashed_out);
        info!(
            session = %session_id,
            cashed_out,
            rolls = session.roll_count,
            "session cashed out"
        );
        self.insert(Key::Session(*session_id), Value::Session(session));

        Ok(Output::CashOut(receipt))
    }

    /// Play and cash out may not tell a missing session from a closed one.
    async fn load_active_session(&self, session_id: &SessionId) -> Result<Session, SlotsError> {
        match load_session(self, session_id).await? {
            Some(session) if session.is_active => Ok(session),
            _ => Err(SlotsError::SessionNotFoundOrInactive),
        }
    }
}
