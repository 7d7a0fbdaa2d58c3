use crate::types::report::{NormalizedScore, StatusLabel};

pub fn rank_order(scores: &[NormalizedScore]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    // Stable, so equal scores keep branch order.
    order.sort_by(|&a, &b| scores[b].cmp(&scores[a]));
    order
}

pub fn rank(scores: &[NormalizedScore]) -> Vec<StatusLabel> {
    let mut labels = vec![StatusLabel::Critical; scores.len()];
    for (position, index) in rank_order(scores).into_iter().enumerate() {
        labels[index] = StatusLabel::for_rank(position);
    }
    labels
}
