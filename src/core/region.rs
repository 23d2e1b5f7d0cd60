//! Filepath: src/core/region.rs
//! Locations and regions over a single source file.
//!
//! A `Region` is an ordered, deduplicated set of locations that
//! together delimit one or more spans of interest. Users may make
//! several selections in the same file; each selection is one
//! location in the region. The region never owns source text, it
//! only slices a borrowed `Source` on demand.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

use crate::core::{
    error::{CueError, CueResult},
    source::{Source, SourceId},
};

/// Immutable byte span in one file, ordered by (file, start, end)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Location
{
    file: SourceId,
    start: usize,
    end: usize,
}

impl Location
{
    /// Build a span; an inverted span is rejected
    pub fn new(
        file: SourceId,
        start: usize,
        end: usize,
    ) -> CueResult<Self>
    {
        if start > end
        {
            return Err(CueError::invalid(format!(
                "location start {start} is after end {end}"
            )));
        }

        Ok(Self { file, start, end })
    }

    /// Zero-width location at `offset`
    pub fn point(
        file: SourceId,
        offset: usize,
    ) -> Self
    {
        Self { file, start: offset, end: offset }
    }

    pub fn file(&self) -> &SourceId
    {
        &self.file
    }

    pub fn start(&self) -> usize
    {
        self.start
    }

    pub fn end(&self) -> usize
    {
        self.end
    }

    /// Does `self` fully contain `other` in the same file?
    pub fn covers(
        &self,
        other: &Location,
    ) -> bool
    {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Display for Location
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        write!(f, "{}[{}..{}]", self.file, self.start, self.end)
    }
}

/// Ordered set of locations belonging to one source file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region
{
    locations: BTreeSet<Location>,
}

impl Region
{
    /// Empty region
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Region seeded with `locations`
    pub fn from_locations<I>(locations: I) -> CueResult<Self>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut region = Self::new();

        for loc in locations
        {
            region.add(loc)?;
        }

        Ok(region)
    }

    /// Insert a location; re-adding is a no-op. A location from a
    /// different file than the region's is rejected.
    pub fn add(
        &mut self,
        location: Location,
    ) -> CueResult<()>
    {
        if let Some(first) = self
            .locations
            .first()
            && first.file != location.file
        {
            return Err(CueError::invalid(format!(
                "location in {} does not belong to region over {}",
                location.file, first.file
            )));
        }

        self.locations
            .insert(location);
        Ok(())
    }

    pub fn contains(
        &self,
        location: &Location,
    ) -> bool
    {
        self.locations
            .contains(location)
    }

    /// Remove a location; absent locations are ignored
    pub fn delete(
        &mut self,
        location: &Location,
    )
    {
        self.locations
            .remove(location);
    }

    pub fn len(&self) -> usize
    {
        self.locations
            .len()
    }

    pub fn is_empty(&self) -> bool
    {
        self.locations
            .is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location>
    {
        self.locations
            .iter()
    }

    /// Smallest location in the region
    pub fn first(&self) -> CueResult<&Location>
    {
        self.locations
            .first()
            .ok_or(CueError::EmptySelection("first"))
    }

    /// Largest location in the region
    pub fn last(&self) -> CueResult<&Location>
    {
        self.locations
            .last()
            .ok_or(CueError::EmptySelection("last"))
    }

    /// Identity of the file this region selects from
    pub fn source_id(&self) -> CueResult<&SourceId>
    {
        self.locations
            .first()
            .map(|l| &l.file)
            .ok_or(CueError::EmptySelection("source_id"))
    }

    /// Does any member location contain `location`?
    pub fn covers(
        &self,
        location: &Location,
    ) -> bool
    {
        self.locations
            .iter()
            .any(|l| l.covers(location))
    }

    /// Locations present in both regions. Iterates the smaller
    /// operand and probes the larger.
    pub fn intersects(
        &self,
        other: &Region,
    ) -> Region
    {
        let (small, large) = if self.len() < other.len()
        {
            (self, other)
        }
        else
        {
            (other, self)
        };

        let locations = small
            .locations
            .iter()
            .filter(|l| large.contains(l))
            .cloned()
            .collect();

        Region { locations }
    }

    /// Union of two non-intersecting regions.
    ///
    /// When the operands share any location the result narrows to a
    /// single-location region holding `self.first()`; check
    /// [`Region::intersects`] first if a full merge is wanted.
    pub fn union(
        &self,
        other: &Region,
    ) -> CueResult<Region>
    {
        let mut out = Region::new();

        if !self
            .intersects(other)
            .is_empty()
        {
            out.add(
                self.first()?
                    .clone(),
            )?;
            return Ok(out);
        }

        for loc in self
            .locations
            .iter()
            .chain(other.locations.iter())
        {
            out.add(loc.clone())?;
        }

        Ok(out)
    }

    /// Location spanning the whole region. If first covers last (or
    /// the reverse) the covering one is returned as is; otherwise a
    /// new span from first's start to last's end is built.
    pub fn bounding_location(&self) -> CueResult<Location>
    {
        let start = self.first()?;
        let end = self.last()?;

        if start.covers(end)
        {
            return Ok(start.clone());
        }

        if end.covers(start)
        {
            return Ok(end.clone());
        }

        Location::new(
            start
                .file
                .clone(),
            start.start,
            end.end.max(start.end),
        )
    }

    /// Slice the owning source's text by the bounding location
    pub fn extract_text<'s>(
        &self,
        source: &'s Source,
    ) -> CueResult<&'s str>
    {
        let bounds = self.bounding_location()?;

        if bounds.file() != source.id()
        {
            return Err(CueError::invalid(format!(
                "region selects from {} but source is {}",
                bounds.file(),
                source.id()
            )));
        }

        source
            .content()
            .get(bounds.start..bounds.end)
            .ok_or(CueError::OutOfRange {
                start: bounds.start,
                end: bounds.end,
                len: source.len(),
            })
    }
}

impl fmt::Display for Region
{
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result
    {
        for loc in &self.locations
        {
            write!(f, "{loc} ")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::core::source::Lang;

    fn loc(
        start: usize,
        end: usize,
    ) -> Location
    {
        Location::new(SourceId::new("Foo"), start, end).expect("valid span")
    }

    fn region(spans: &[(usize, usize)]) -> Region
    {
        Region::from_locations(
            spans
                .iter()
                .map(|&(s, e)| loc(s, e)),
        )
        .expect("same file")
    }

    #[test]
    fn inverted_span_is_invalid()
    {
        let err = Location::new(SourceId::new("Foo"), 5, 2).unwrap_err();
        assert!(matches!(err, CueError::InvalidArgument(_)));
    }

    #[test]
    fn add_is_idempotent()
    {
        let mut once = Region::new();
        once.add(loc(1, 4))
            .unwrap();

        let mut twice = once.clone();
        twice
            .add(loc(1, 4))
            .unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice.len(), 1);
    }

    #[test]
    fn add_rejects_foreign_file()
    {
        let mut r = region(&[(0, 3)]);
        let other = Location::new(SourceId::new("Bar"), 0, 3).unwrap();

        assert!(matches!(r.add(other), Err(CueError::InvalidArgument(_))));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn delete_absent_is_noop()
    {
        let mut r = region(&[(0, 3), (5, 9)]);
        r.delete(&loc(100, 200));
        assert_eq!(r.len(), 2);

        r.delete(&loc(0, 3));
        assert!(!r.contains(&loc(0, 3)));
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn empty_region_fails_with_empty_selection()
    {
        let r = Region::new();

        assert_eq!(r.first(), Err(CueError::EmptySelection("first")));
        assert_eq!(r.last(), Err(CueError::EmptySelection("last")));
        assert!(matches!(r.bounding_location(), Err(CueError::EmptySelection(_))));
        assert!(matches!(r.source_id(), Err(CueError::EmptySelection(_))));
    }

    #[test]
    fn first_and_last_follow_ordering()
    {
        let r = region(&[(10, 12), (2, 8), (2, 4)]);

        assert_eq!(r.first().unwrap(), &loc(2, 4));
        assert_eq!(r.last().unwrap(), &loc(10, 12));
    }

    #[test]
    fn bounding_location_prefers_covering_member()
    {
        // first covers last
        let r = region(&[(0, 20), (5, 10)]);
        assert_eq!(r.bounding_location().unwrap(), loc(0, 20));

        // disjoint spans get a synthesized envelope
        let r = region(&[(0, 3), (8, 12)]);
        assert_eq!(r.bounding_location().unwrap(), loc(0, 12));
    }

    #[test]
    fn intersects_keeps_shared_locations()
    {
        let a = region(&[(0, 1), (2, 3), (4, 5)]);
        let b = region(&[(2, 3), (4, 5), (6, 7), (8, 9)]);

        let ab = a.intersects(&b);
        let ba = b.intersects(&a);

        assert_eq!(ab, region(&[(2, 3), (4, 5)]));
        assert_eq!(ab.len(), ba.len());
        // operands untouched
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 4);
    }

    #[test]
    fn union_of_disjoint_regions_merges_all()
    {
        let a = region(&[(0, 1), (2, 3)]);
        let b = region(&[(4, 5)]);

        assert_eq!(a.union(&b).unwrap(), region(&[(0, 1), (2, 3), (4, 5)]));
    }

    #[test]
    fn union_of_intersecting_regions_narrows_to_first()
    {
        let a = region(&[(2, 3), (0, 1)]);
        let b = region(&[(2, 3), (6, 7)]);

        let u = a
            .union(&b)
            .unwrap();

        assert_eq!(u, region(&[(0, 1)]));
    }

    #[test]
    fn extract_text_slices_bounding_span()
    {
        let src = Source::from_text("Foo", Lang::Java, "class Foo { int x; }");
        let r = region(&[(0, 5), (6, 9)]);

        assert_eq!(r.extract_text(&src).unwrap(), "class Foo");
    }

    #[test]
    fn extract_text_out_of_range()
    {
        let src = Source::from_text("Foo", Lang::Java, "short");
        let r = region(&[(2, 40)]);

        assert_eq!(
            r.extract_text(&src),
            Err(CueError::OutOfRange { start: 2, end: 40, len: 5 })
        );
    }

    #[test]
    fn extract_text_rejects_other_source()
    {
        let src = Source::from_text("Bar", Lang::Java, "class Bar {}");
        let r = region(&[(0, 3)]);

        assert!(matches!(r.extract_text(&src), Err(CueError::InvalidArgument(_))));
    }

    #[test]
    fn display_lists_locations()
    {
        let r = region(&[(0, 1), (2, 3)]);
        assert_eq!(r.to_string(), "Foo[0..1] Foo[2..3] ");
    }
}
