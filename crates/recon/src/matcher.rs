use crate::model::{MatchCounts, MatchOutput, MatchResult, MediaRecord};

/// Match every master record against every same-named LTO record.
///
/// Names must be equal; a master name carried on several tapes produces one
/// result per LTO record, in LTO order. `non_matched` counts mismatch
/// reasons, so one row can add up to three.
pub fn compare(master: &[MediaRecord], lto: &[MediaRecord]) -> MatchOutput {
    let mut counts = MatchCounts::default();
    let mut results = Vec::with_capacity(master.len());

    for master_rec in master {
        let mut found = false;

        for lto_rec in lto.iter().filter(|l| l.name == master_rec.name) {
            found = true;
            let result = MatchResult::classify(master_rec, lto_rec);
            if result.is_match() {
                counts.matched += 1;
            } else {
                counts.non_matched += result.reasons().len();
            }
            log::trace!("{} vs {:?}: {}", master_rec.name, lto_rec.media, result.status());
            results.push(result);
        }

        if !found {
            counts.not_found += 1;
            log::trace!("{}: not found on LTO", master_rec.name);
            results.push(MatchResult::not_found(master_rec));
        }
    }

    MatchOutput { counts, results }
}
