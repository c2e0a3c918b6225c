use std::collections::HashSet;
use std::ops::Range;

use enum_iterator::all;
use itertools::Itertools;
use log::{debug, info};

use crate::cycle::access_timing::AccessRequirement;
use crate::cycle::access_type::AccessType;
use crate::cycle::cycle_pattern_register::CyclePatterns;
use crate::cycle::occupancy::OccupancyBitmap;
use crate::cycle::timing_range::{cpd_range, in_range, vcs_range, TvScreenMode};
use crate::error::CycpError;
use crate::memory::vram_bank::{BankSplitMode, VramBank};
use crate::screen::scroll_screen::ScrollScreen;

/// Everything the allocator needs to know about one normal background: how many timings
/// each transfer needs, and which banks' registers have to carry them. Banks are already
/// folded onto the register that services them.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ScreenDemand {
    pub screen: ScrollScreen,
    pub requirement: AccessRequirement,
    pub pnd_banks: Vec<VramBank>,
    pub cpd_bank: Option<VramBank>,
    pub vcs_bank: Option<VramBank>,
    pnd_access: AccessType,
    cpd_access: AccessType,
    vcs_access: Option<AccessType>,
}

impl ScreenDemand {
    /// None for rotational backgrounds, which have no cycle pattern codes.
    pub fn new(
        screen: ScrollScreen,
        requirement: AccessRequirement,
        pnd_occupancy: OccupancyBitmap,
        cpd_bank: Option<VramBank>,
        vcs_occupancy: OccupancyBitmap,
        split_mode: BankSplitMode,
    ) -> Option<ScreenDemand> {
        let pnd_banks = pnd_occupancy.banks().into_iter()
            .map(|bank| split_mode.servicing_bank(bank))
            .unique()
            .collect();
        let vcs_bank = vcs_occupancy.banks().first()
            .map(|&bank| split_mode.servicing_bank(bank));

        Some(ScreenDemand {
            screen,
            requirement,
            pnd_banks,
            cpd_bank: cpd_bank.map(|bank| split_mode.servicing_bank(bank)),
            vcs_bank,
            pnd_access: AccessType::pattern_name(screen)?,
            cpd_access: AccessType::character_pattern(screen)?,
            vcs_access: AccessType::vertical_cell_scroll(screen),
        })
    }

    fn demand_on(&self, bank: VramBank) -> u8 {
        let mut demand = 0;
        if self.pnd_banks.contains(&bank) {
            demand += self.requirement.pnd_slots;
        }

        if self.cpd_bank == Some(bank) {
            demand += self.requirement.cpd_slots;
        }

        if self.vcs_bank == Some(bank) {
            demand += self.requirement.vcs_slots;
        }

        demand
    }
}

/// Packs every screen's demand into the four cycle pattern registers, or explains why it
/// can't. Screens are placed in the order given; each screen takes its pattern name
/// timings first, then its vertical cell scroll timing, then its character pattern
/// timings. Candidates are tried lowest timing first and the search backtracks into earlier
/// screens, so the first complete packing found is the result.
pub fn allocate(
    demands: &[ScreenDemand],
    split_mode: BankSplitMode,
    tv_screen_mode: TvScreenMode,
    fill_cpu_access: bool,
) -> Result<CyclePatterns, CycpError> {
    check_capacity(demands, tv_screen_mode)?;

    let mut allocator = SlotAllocator {
        demands,
        tv_screen_mode,
        deepest_failure: 0,
        dead_ends: HashSet::new(),
    };
    let Some(mut patterns) = allocator.place(0, CyclePatterns::all_no_access()) else {
        let screen = demands.get(allocator.deepest_failure)
            .map_or(ScrollScreen::Nbg0, |demand| demand.screen);
        return Err(CycpError::NoLegalPlacement { screen });
    };

    if !split_mode.is_a_split() {
        patterns[VramBank::A1] = patterns[VramBank::A0];
    }

    if !split_mode.is_b_split() {
        patterns[VramBank::B1] = patterns[VramBank::B0];
    }

    if fill_cpu_access {
        for bank in all::<VramBank>() {
            patterns[bank].fill_unclaimed(tv_screen_mode.slot_count(), AccessType::CpuReadWrite);
        }
    }

    Ok(patterns)
}

fn check_capacity(demands: &[ScreenDemand], tv_screen_mode: TvScreenMode) -> Result<(), CycpError> {
    let available = tv_screen_mode.slot_count() as u8;
    for bank in all::<VramBank>() {
        let required: u8 = demands.iter().map(|demand| demand.demand_on(bank)).sum();
        if required > available {
            return Err(CycpError::CapacityExceeded { bank, required, available });
        }
    }

    Ok(())
}

struct SlotAllocator<'a> {
    demands: &'a [ScreenDemand],
    tv_screen_mode: TvScreenMode,
    deepest_failure: usize,
    // Screen index and register contents already known to lead nowhere.
    dead_ends: HashSet<(usize, [u32; 4])>,
}

impl SlotAllocator<'_> {
    fn place(&mut self, index: usize, patterns: CyclePatterns) -> Option<CyclePatterns> {
        let demands = self.demands;
        let Some(demand) = demands.get(index) else {
            return Some(patterns);
        };

        self.deepest_failure = self.deepest_failure.max(index);
        if self.dead_ends.contains(&(index, patterns.values())) {
            return None;
        }

        for pnd_slots in self.pattern_name_candidates(demand, &patterns) {
            let mut with_pnd = patterns;
            for &bank in &demand.pnd_banks {
                for &slot in &pnd_slots {
                    with_pnd[bank].set_slot(slot, demand.pnd_access);
                }
            }

            for vcs_slot in self.vertical_cell_scroll_candidates(demand, &with_pnd) {
                let mut with_vcs = with_pnd;
                if let (Some(slot), Some(bank), Some(access)) = (vcs_slot, demand.vcs_bank, demand.vcs_access) {
                    with_vcs[bank].set_slot(slot, access);
                }

                for cpd_slots in self.character_pattern_candidates(demand, &with_vcs, &pnd_slots) {
                    let mut with_cpd = with_vcs;
                    if let Some(bank) = demand.cpd_bank {
                        for &slot in &cpd_slots {
                            with_cpd[bank].set_slot(slot, demand.cpd_access);
                        }
                    }

                    debug!(target: "allocation", "{}: trying PND {:?} VCS {:?} CPD {:?}",
                        demand.screen, pnd_slots, vcs_slot, cpd_slots);
                    if let Some(done) = self.place(index + 1, with_cpd) {
                        info!(target: "allocation", "{}: PND {:?} in {:?}, VCS {:?}, CPD {:?} in {:?}",
                            demand.screen, pnd_slots, demand.pnd_banks, vcs_slot, cpd_slots, demand.cpd_bank);
                        return Some(done);
                    }
                }
            }
        }

        debug!(target: "allocation", "{}: no placement left, backtracking", demand.screen);
        self.dead_ends.insert((index, patterns.values()));
        None
    }

    // The same timings have to be free in every bank holding the screen's planes.
    fn pattern_name_candidates(&self, demand: &ScreenDemand, patterns: &CyclePatterns) -> Vec<Vec<usize>> {
        let free = self.slots()
            .filter(|&slot| demand.pnd_banks.iter().all(|&bank| patterns[bank].is_free(slot)));
        combinations(free, demand.requirement.pnd_slots)
    }

    fn vertical_cell_scroll_candidates(&self, demand: &ScreenDemand, patterns: &CyclePatterns) -> Vec<Option<usize>> {
        let Some(bank) = demand.vcs_bank.filter(|_| demand.requirement.vcs_slots > 0) else {
            return vec![None];
        };

        let range = vcs_range(demand.screen);
        self.slots()
            .filter(|&slot| in_range(range, slot) && patterns[bank].is_free(slot))
            .map(Some)
            .collect()
    }

    // Each character pattern timing must be reachable from at least one of the screen's
    // pattern name timings. Bitmap screens have none, so any free timing will do.
    fn character_pattern_candidates(
        &self,
        demand: &ScreenDemand,
        patterns: &CyclePatterns,
        pnd_slots: &[usize],
    ) -> Vec<Vec<usize>> {
        let count = demand.requirement.cpd_slots;
        let Some(bank) = demand.cpd_bank else {
            return if count == 0 { vec![Vec::new()] } else { Vec::new() };
        };

        let permitted = if pnd_slots.is_empty() {
            0xFF
        } else {
            pnd_slots.iter().fold(0, |range, &slot| range | cpd_range(self.tv_screen_mode, slot))
        };

        let free = self.slots()
            .filter(|&slot| in_range(permitted, slot) && patterns[bank].is_free(slot));
        combinations(free, count)
    }

    fn slots(&self) -> Range<usize> {
        0..self.tv_screen_mode.slot_count()
    }
}

fn combinations(free: impl Iterator<Item = usize>, count: u8) -> Vec<Vec<usize>> {
    if count == 0 {
        return vec![Vec::new()];
    }

    free.combinations(usize::from(count)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(pnd_slots: u8, cpd_slots: u8, vcs_slots: u8) -> AccessRequirement {
        AccessRequirement { pnd_slots, cpd_slots, vcs_slots }
    }

    fn demand(
        screen: ScrollScreen,
        requirement: AccessRequirement,
        pnd_banks: &[VramBank],
        cpd_bank: VramBank,
        vcs_bank: Option<VramBank>,
    ) -> ScreenDemand {
        let vcs_occupancy = vcs_bank.map_or(OccupancyBitmap::EMPTY, OccupancyBitmap::from_bank);
        ScreenDemand::new(
            screen,
            requirement,
            OccupancyBitmap::from_banks(pnd_banks),
            Some(cpd_bank),
            vcs_occupancy,
            BankSplitMode::SplitBoth,
        ).unwrap()
    }

    fn slots_of(patterns: &CyclePatterns, bank: VramBank, access: AccessType) -> Vec<usize> {
        (0..8).filter(|&slot| patterns[bank].slot(slot) == Some(access)).collect()
    }

    #[test]
    fn example_nbg0_packing() {
        let nbg0 = ScreenDemand::new(
            ScrollScreen::Nbg0,
            requirement(1, 1, 1),
            OccupancyBitmap::from_banks(&[VramBank::B0, VramBank::B1]),
            Some(VramBank::A0),
            OccupancyBitmap::from_bank(VramBank::A0),
            BankSplitMode::NoSplit,
        ).unwrap();
        assert_eq!(nbg0.pnd_banks, vec![VramBank::B0]);

        let patterns = allocate(&[nbg0], BankSplitMode::NoSplit, TvScreenMode::Normal, false).unwrap();
        assert_eq!(patterns.values(), [0xFFFF_FF4C, 0xFFFF_FF4C, 0xFFFF_FFF0, 0xFFFF_FFF0]);
    }

    #[test]
    fn pattern_name_timings_match_across_banks() {
        let nbg1 = demand(ScrollScreen::Nbg1, requirement(2, 1, 0), &[VramBank::A0, VramBank::B1], VramBank::A1, None);
        let patterns = allocate(&[nbg1], BankSplitMode::SplitBoth, TvScreenMode::Normal, false).unwrap();
        let a0 = slots_of(&patterns, VramBank::A0, AccessType::PatternNameNbg1);
        let b1 = slots_of(&patterns, VramBank::B1, AccessType::PatternNameNbg1);
        assert_eq!(a0, vec![0, 1]);
        assert_eq!(a0, b1);
        assert_eq!(slots_of(&patterns, VramBank::A1, AccessType::CharacterPatternNbg1), vec![0]);
    }

    #[test]
    fn character_pattern_respects_adjacency() {
        // NBG0 already owns T0 to T3 of A0 for its pattern names, so NBG1's pattern name
        // read lands in T4 and its character pattern read can only go in T0 to T3 of B0.
        let nbg0 = demand(ScrollScreen::Nbg0, requirement(4, 4, 0), &[VramBank::A0], VramBank::A1, None);
        let nbg1 = demand(ScrollScreen::Nbg1, requirement(1, 1, 0), &[VramBank::A0], VramBank::B0, None);
        let patterns = allocate(&[nbg0, nbg1], BankSplitMode::SplitBoth, TvScreenMode::Normal, false).unwrap();
        assert_eq!(slots_of(&patterns, VramBank::A0, AccessType::PatternNameNbg1), vec![4]);
        assert_eq!(slots_of(&patterns, VramBank::B0, AccessType::CharacterPatternNbg1), vec![0]);
        assert_eq!(slots_of(&patterns, VramBank::A1, AccessType::CharacterPatternNbg0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn adjacency_failure_names_screen() {
        // In hi-res mode no pattern name timing reaches all three of the other timings.
        let nbg0 = demand(ScrollScreen::Nbg0, requirement(1, 1, 0), &[VramBank::B0], VramBank::B0, None);
        let nbg1 = demand(ScrollScreen::Nbg1, requirement(1, 3, 0), &[VramBank::A0], VramBank::A0, None);
        let result = allocate(&[nbg0, nbg1], BankSplitMode::SplitBoth, TvScreenMode::HiRes, false);
        assert!(matches!(result, Err(CycpError::NoLegalPlacement { screen: ScrollScreen::Nbg1 })));
    }

    #[test]
    fn capacity_is_checked_per_bank() {
        let nbg0 = demand(ScrollScreen::Nbg0, requirement(0, 8, 0), &[], VramBank::B0, None);
        let nbg1 = demand(ScrollScreen::Nbg1, requirement(4, 2, 1), &[VramBank::B0], VramBank::A0, Some(VramBank::A0));
        let result = allocate(&[nbg0, nbg1], BankSplitMode::SplitBoth, TvScreenMode::Normal, false);
        assert!(matches!(
            result,
            Err(CycpError::CapacityExceeded { bank: VramBank::B0, required: 12, available: 8 }),
        ));
    }

    #[test]
    fn hi_res_only_uses_first_four_timings() {
        let nbg0 = demand(ScrollScreen::Nbg0, requirement(1, 2, 0), &[VramBank::A0], VramBank::A0, None);
        let patterns = allocate(&[nbg0], BankSplitMode::SplitBoth, TvScreenMode::HiRes, true).unwrap();
        assert_eq!(patterns[VramBank::A0].to_u32(), 0xFFFF_E440);
        assert_eq!(patterns[VramBank::B1].to_u32(), 0xFFFF_EEEE);

        let greedy = demand(ScrollScreen::Nbg1, requirement(2, 3, 0), &[VramBank::B0], VramBank::B0, None);
        assert!(matches!(
            allocate(&[greedy], BankSplitMode::SplitBoth, TvScreenMode::HiRes, false),
            Err(CycpError::CapacityExceeded { available: 4, .. }),
        ));
    }

    #[test]
    fn vertical_cell_scroll_ranges_are_shared() {
        let nbg0 = demand(ScrollScreen::Nbg0, requirement(1, 1, 1), &[VramBank::B0], VramBank::B1, Some(VramBank::A0));
        let nbg1 = demand(ScrollScreen::Nbg1, requirement(1, 1, 1), &[VramBank::B0], VramBank::B1, Some(VramBank::A0));
        let patterns = allocate(&[nbg0, nbg1], BankSplitMode::SplitBoth, TvScreenMode::Normal, false).unwrap();
        assert_eq!(slots_of(&patterns, VramBank::A0, AccessType::VerticalCellScrollNbg0), vec![0]);
        assert_eq!(slots_of(&patterns, VramBank::A0, AccessType::VerticalCellScrollNbg1), vec![1]);
    }

    #[test]
    fn vertical_cell_scroll_range_can_run_out() {
        // Both screens read everything from B0, filling it. The two scroll reads need two of
        // T0 to T2, and no pattern name timing lets both of its character pattern reads sit
        // in T3 to T7 next to it, so only four of the other six reads fit there.
        let without_scroll = [
            demand(ScrollScreen::Nbg0, requirement(1, 2, 0), &[VramBank::B0], VramBank::B0, None),
            demand(ScrollScreen::Nbg1, requirement(1, 2, 0), &[VramBank::B0], VramBank::B0, None),
        ];
        assert!(allocate(&without_scroll, BankSplitMode::SplitBoth, TvScreenMode::Normal, false).is_ok());

        let with_scroll = [
            demand(ScrollScreen::Nbg0, requirement(1, 2, 1), &[VramBank::B0], VramBank::B0, Some(VramBank::B0)),
            demand(ScrollScreen::Nbg1, requirement(1, 2, 1), &[VramBank::B0], VramBank::B0, Some(VramBank::B0)),
        ];
        let result = allocate(&with_scroll, BankSplitMode::SplitBoth, TvScreenMode::Normal, false);
        assert!(matches!(result, Err(CycpError::NoLegalPlacement { screen: ScrollScreen::Nbg1 })));
    }

    #[test]
    fn rotational_screens_have_no_demand() {
        let demand = ScreenDemand::new(
            ScrollScreen::Rbg0,
            requirement(1, 1, 0),
            OccupancyBitmap::from_bank(VramBank::A0),
            Some(VramBank::A0),
            OccupancyBitmap::EMPTY,
            BankSplitMode::NoSplit,
        );
        assert_eq!(demand, None);
    }

    #[test]
    fn nothing_to_place() {
        let patterns = allocate(&[], BankSplitMode::NoSplit, TvScreenMode::Normal, false).unwrap();
        assert_eq!(patterns, CyclePatterns::all_no_access());
    }
}
