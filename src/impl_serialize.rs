use std::fmt;
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, Error, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::dims::Dims;
use crate::extents::Extents;
use crate::index::IndexType;
use crate::layout::{LayoutRight, Mapping};

impl<I: IndexType + Serialize, D: Dims> Serialize for Extents<I, D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.shape().as_ref())
    }
}

impl<'de, I: IndexType + Deserialize<'de>, D: Dims> Deserialize<'de> for Extents<I, D> {
    fn deserialize<De>(deserializer: De) -> Result<Extents<I, D>, De::Error>
    where
        De: Deserializer<'de>,
    {
        let shape = Vec::<I>::deserialize(deserializer)?;
        Extents::try_from_shape(&shape).map_err(De::Error::custom)
    }
}

impl<I: IndexType + Serialize, D: Dims> Serialize for LayoutRight<I, D> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut mapping = serializer.serialize_struct("LayoutRight", 1)?;
        mapping.serialize_field("extents", self.extents())?;
        mapping.end()
    }
}

struct MappingVisitor<I, D> {
    index_marker: PhantomData<I>,
    dims_marker: PhantomData<D>,
}

impl<'de, I, D> Visitor<'de> for MappingVisitor<I, D>
where
    I: IndexType + Deserialize<'de>,
    D: Dims,
{
    type Value = LayoutRight<I, D>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "a mapping with an \"extents\" field")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut extents: Option<Extents<I, D>> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "extents" => {
                    if extents.is_some() {
                        return Err(A::Error::duplicate_field("extents"));
                    }
                    extents = Some(map.next_value()?);
                }
                _ => {
                    return Err(A::Error::unknown_field(&key, &["extents"]));
                }
            }
        }

        let Some(extents) = extents else {
            return Err(A::Error::missing_field("extents"));
        };

        LayoutRight::try_new(extents).map_err(A::Error::custom)
    }
}

impl<'de, I, D> Deserialize<'de> for LayoutRight<I, D>
where
    I: IndexType + Deserialize<'de>,
    D: Dims,
{
    fn deserialize<De>(deserializer: De) -> Result<LayoutRight<I, D>, De::Error>
    where
        De: Deserializer<'de>,
    {
        deserializer.deserialize_struct(
            "LayoutRight",
            &["extents"],
            MappingVisitor::<I, D> {
                index_marker: PhantomData,
                dims_marker: PhantomData,
            },
        )
    }
}
