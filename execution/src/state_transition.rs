use crate::{slots::Entropy, Layer, State};
use slots_types::{
    execution::{Instruction, Key, Output, Value},
    SlotsError,
};

/// Run an instruction against `state` without applying it.
///
/// Returns the output along with every change the instruction makes. Either
/// all changes are returned or the instruction fails with none.
pub async fn prepare<S: State, E: Entropy>(
    state: &S,
    entropy: &E,
    now: u64,
    instruction: &Instruction,
) -> Result<(Output, Vec<(Key, Value)>), SlotsError> {
    let mut layer = Layer::new(state, entropy, now);
    let output = layer.apply(instruction).await?;
    Ok((output, layer.commit()))
}

/// Run an instruction and apply its changes to `state`.
pub async fn execute<S: State, E: Entropy>(
    state: &mut S,
    entropy: &E,
    now: u64,
    instruction: &Instruction,
) -> Result<Output, SlotsError> {
    let (output, changes) = prepare(&*state, entropy, now, instruction).await?;
    state.apply(changes).await;
    Ok(output)
}
