// src/layout/calculator.rs
//! Calculates the target transform of every card in a hand or discard pile.

use crate::components::transform::Transform;
use crate::config::layout::{Align, MAX_CARD_GAP};

/// カード1枚分の (拡大前の) 大きさ
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildSize {
    pub width: f64,
    pub height: f64,
}

impl ChildSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// 高さ 0 (画像の読み込みがまだ、とか) のカードは測れないので計算から外す。
    pub fn is_measurable(&self) -> bool {
        self.height != 0.0 && !self.height.is_nan()
    }
}

/// レイアウト計算に必要な、コンテナ側の情報
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    pub align: Align,
    pub reverse: bool,
}

/// 計算結果。`targets` は子の並びと同じ順番で、測れないカードは `None`。
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutPlan {
    /// カード同士の隙間 (負なら重なる)
    pub gap: f64,
    /// 拡大後のカード幅の合計 + 隙間の合計
    pub used_width: f64,
    /// 最初のカードの基準 x (reverse なら右端側)
    pub start_x: f64,
    pub targets: Vec<Option<Transform>>,
}

/// 手札のカード全部の目標位置を計算するよ！
///
/// 1. 各カードを、高さがコンテナの高さにぴったり合うように一様に拡大する。
/// 2. 残った幅をカード間に均等に配る。ただし隙間は `MAX_CARD_GAP` まで。
///    はみ出す時は隙間が負になってカードが重なる (下限は無い)。
/// 3. 中央寄せで余白があるなら、全体を真ん中に寄せる。
/// 4. reverse なら右から左へ並べる (左右反転)。
pub fn calculate_layout(params: &LayoutParams, sizes: &[ChildSize]) -> LayoutPlan {
    let lw = params.width;
    let lh = params.height;
    // 隙間の数は測れないカードも含めた枚数で数える
    let slots = sizes.len() as f64 - 1.0;

    let mut used_width: f64 = sizes
        .iter()
        .filter(|s| s.is_measurable())
        .map(|s| lh / s.height * s.width)
        .sum();

    let mut gap: f64 = 0.0;
    if sizes.len() > 1 {
        gap = (lw - used_width) / slots;
    }
    gap = gap.min(MAX_CARD_GAP);

    if sizes.len() > 1 {
        used_width += gap * slots;
    }

    let mut start_x: f64 = 0.0;
    if params.align == Align::Center && used_width < lw {
        start_x = (lw - used_width) / 2.0;
    }
    if params.reverse {
        start_x = lw - start_x;
    }

    let direction = if params.reverse { -1.0 } else { 1.0 };
    let mut x = start_x;
    let targets = sizes
        .iter()
        .map(|size| {
            if !size.is_measurable() {
                return None;
            }
            let scale = lh / size.height;
            let scaled_width = scale * size.width;
            let left = if params.reverse { x - scaled_width } else { x };
            x += (scaled_width + gap) * direction;
            Some(Transform::placed(left, 0.0, scale))
        })
        .collect();

    LayoutPlan {
        gap,
        used_width,
        start_x,
        targets,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn params(width: f64, align: Align, reverse: bool) -> LayoutParams {
        LayoutParams {
            width,
            height: 100.0,
            align,
            reverse,
        }
    }

    fn xs(plan: &LayoutPlan) -> Vec<f64> {
        plan.targets.iter().flatten().map(|t| t.x).collect()
    }

    #[test]
    fn cards_are_scaled_to_container_height() {
        let plan = calculate_layout(
            &params(1000.0, Align::Left, false),
            &[ChildSize::new(50.0, 50.0), ChildSize::new(70.0, 200.0)],
        );
        let scales: Vec<f64> = plan.targets.iter().flatten().map(|t| t.scale_x).collect();
        assert_eq!(scales, vec![2.0, 0.5]);
        for t in plan.targets.iter().flatten() {
            assert_eq!(t.scale_x, t.scale_y);
            assert_eq!(t.y, 0.0);
            assert_eq!(t.rotation, 0.0);
        }
    }

    #[test]
    fn gap_is_capped_at_ten_when_hand_is_roomy() {
        // 3枚 × 幅50 = 150、残り 850 を 2 で割ると 425 → 10 に制限
        let sizes = [ChildSize::new(50.0, 100.0); 3];
        let plan = calculate_layout(&params(1000.0, Align::Left, false), &sizes);
        assert_eq!(plan.gap, MAX_CARD_GAP);
        assert_eq!(plan.used_width, 170.0);
        assert_eq!(xs(&plan), vec![0.0, 60.0, 120.0]);
    }

    #[test]
    fn crowded_hand_fills_width_exactly_with_overlap() {
        let sizes = [ChildSize::new(100.0, 100.0); 5];
        let plan = calculate_layout(&params(300.0, Align::Left, false), &sizes);
        assert!((plan.gap - -50.0).abs() < EPS, "はみ出す時は隙間が負になる");
        assert!((plan.used_width - 300.0).abs() < EPS);
        let last = plan.targets.last().unwrap().unwrap();
        assert!((last.x + 100.0 - 300.0).abs() < EPS, "最後のカードの右端がコンテナの右端");
    }

    #[test]
    fn natural_gap_below_cap_fills_left_layout() {
        let sizes = [ChildSize::new(90.0, 100.0); 3];
        let plan = calculate_layout(&params(290.0, Align::Left, false), &sizes);
        assert!((plan.gap - 10.0).abs() < EPS);
        assert!(plan.used_width <= 290.0 + EPS);
    }

    #[test]
    fn center_alignment_centers_the_run() {
        let sizes = [ChildSize::new(50.0, 100.0); 3];
        let plan = calculate_layout(&params(1000.0, Align::Center, false), &sizes);
        assert_eq!(plan.start_x, (1000.0 - 170.0) / 2.0);
        let first = plan.targets[0].unwrap();
        let last = plan.targets[2].unwrap();
        let left_margin = first.x;
        let right_margin = 1000.0 - (last.x + 50.0);
        assert!((left_margin - right_margin).abs() < EPS, "左右の余白は同じはず");
    }

    #[test]
    fn left_alignment_leaves_space_on_the_right() {
        let sizes = [ChildSize::new(50.0, 100.0); 3];
        let plan = calculate_layout(&params(1000.0, Align::Left, false), &sizes);
        assert_eq!(plan.start_x, 0.0);
    }

    #[test]
    fn reverse_mirrors_forward_layout() {
        let sizes = [
            ChildSize::new(50.0, 100.0),
            ChildSize::new(80.0, 100.0),
            ChildSize::new(30.0, 60.0),
        ];
        for align in [Align::Left, Align::Center] {
            let forward = calculate_layout(&params(400.0, align, false), &sizes);
            let backward = calculate_layout(&params(400.0, align, true), &sizes);
            for (i, size) in sizes.iter().enumerate() {
                let f = forward.targets[i].unwrap();
                let b = backward.targets[i].unwrap();
                assert_eq!(f.scale_x, b.scale_x);
                let scaled = f.scale_x * size.width;
                assert!(
                    (b.x - (400.0 - f.x - scaled)).abs() < EPS,
                    "card {} should be mirrored ({:?})",
                    i,
                    align
                );
            }
        }
    }

    #[test]
    fn zero_height_children_are_skipped_but_counted_as_slots() {
        let sizes = [
            ChildSize::new(50.0, 100.0),
            ChildSize::new(50.0, 0.0),
            ChildSize::new(50.0, 100.0),
        ];
        let plan = calculate_layout(&params(1000.0, Align::Left, false), &sizes);
        assert_eq!(plan.targets[1], None);
        assert_eq!(plan.gap, MAX_CARD_GAP);
        // 測れないカードは x を進めない
        assert_eq!(xs(&plan), vec![0.0, 60.0]);
    }

    #[test]
    fn single_and_empty_layouts() {
        let single = calculate_layout(
            &params(1000.0, Align::Center, false),
            &[ChildSize::new(50.0, 100.0)],
        );
        assert_eq!(single.gap, 0.0);
        assert_eq!(single.start_x, 475.0);

        let empty = calculate_layout(&params(1000.0, Align::Center, true), &[]);
        assert!(empty.targets.is_empty());
        assert_eq!(empty.used_width, 0.0);
    }

    #[test]
    fn layout_is_idempotent() {
        let sizes = [ChildSize::new(63.0, 88.0); 4];
        let p = params(240.0, Align::Center, true);
        assert_eq!(calculate_layout(&p, &sizes), calculate_layout(&p, &sizes));
    }
}
