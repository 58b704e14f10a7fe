use vote_chain::{
    report::write_text_report, DigestFormat, HashAlgorithm, Ledger, Party, VoteSampler,
};

fn build(votes: &[Party]) -> Ledger<HashAlgorithm> {
    let mut ledger = Ledger::new(HashAlgorithm::Blake2b);
    for vote in votes {
        ledger.record(vote.label()).expect("record vote");
    }
    ledger
}

fn main() {
    let votes: Vec<Party> = VoteSampler::from_seed(42).take(6).collect();
    let honest = build(&votes);
    let honest_summaries = honest.render();
    write_text_report(&mut std::io::stdout(), &honest_summaries, DigestFormat::Hex)
        .expect("write report");

    // Rewrite the third vote and replay the election.
    let mut forged_votes = votes.clone();
    forged_votes[2] = match forged_votes[2] {
        Party::EvilParty => Party::GoodParty,
        _ => Party::EvilParty,
    };
    let forged = build(&forged_votes).render();

    for (depth, (a, b)) in honest_summaries.iter().zip(&forged).enumerate() {
        let status = if a.block_hash == b.block_hash {
            "unchanged"
        } else {
            "diverged"
        };
        println!(
            "block {depth}: {} -> {} ({status})",
            DigestFormat::Hex.apply(a.block_hash),
            DigestFormat::Hex.apply(b.block_hash)
        );
    }
}
