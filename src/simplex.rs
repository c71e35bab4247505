//! The search structure itself: n+1 vertices with cached costs, ranked by
//! cost and deformed through the reflect/expand/contract/shrink moves.

use ndarray::prelude::*;

use crate::error::Error;
use crate::utils::Evaluations;

/// One corner of the simplex: a point and the objective value at that point,
/// evaluated when the vertex is created. The two are never updated
/// independently of each other.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex {
    pub point: Array1<f64>,
    pub cost: f64,
}

/// A simplex of `dim + 1` vertices spanning `dim`-dimensional space.
///
/// Ordered accessors ([`best`](Simplex::best), [`worst`](Simplex::worst),
/// [`second_worst`](Simplex::second_worst), [`centroid`](Simplex::centroid),
/// [`trial`](Simplex::trial), [`spread`](Simplex::spread)) require a
/// preceding [`rank`](Simplex::rank) in the current iteration; calling them
/// on an unranked simplex panics.
#[derive(Debug)]
pub struct Simplex {
    vertices: Vec<Vertex>,
    dim: usize,
    ranked: bool,
}

impl Simplex {
    /// Spans the initial simplex around `x0`: the point itself plus one copy
    /// per axis with that coordinate offset by `step`.
    pub fn from_point<F>(
        x0: ArrayView1<f64>,
        step: f64,
        func: &mut Evaluations<F>,
    ) -> Result<Self, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let dim = x0.len();
        if dim == 0 {
            return Err(Error::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }
        if step == 0.0 || !step.is_finite() {
            return Err(Error::DegenerateSimplex { step });
        }

        let mut vertices = Vec::with_capacity(dim + 1);
        vertices.push(Vertex {
            cost: func.call(x0)?,
            point: x0.to_owned(),
        });
        for axis in 0..dim {
            let mut point = x0.to_owned();
            point[axis] += step;
            let cost = func.call(point.view())?;
            vertices.push(Vertex { point, cost });
        }
        Ok(Simplex {
            vertices,
            dim,
            ranked: false,
        })
    }

    /// Builds a simplex from an explicit `(n + 1, n)` matrix of vertex
    /// coordinates, one row per vertex. The search then only ever explores
    /// the space those rows span.
    pub fn from_vertices<F>(
        rows: ArrayView2<f64>,
        func: &mut Evaluations<F>,
    ) -> Result<Self, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        let (count, dim) = rows.dim();
        if dim == 0 {
            return Err(Error::InvalidDimension {
                expected: 1,
                actual: 0,
            });
        }
        if count != dim + 1 {
            return Err(Error::InvalidDimension {
                expected: dim + 1,
                actual: count,
            });
        }
        let mut vertices = Vec::with_capacity(count);
        for row in rows.outer_iter() {
            let cost = func.call(row)?;
            vertices.push(Vertex {
                point: row.to_owned(),
                cost,
            });
        }
        Ok(Simplex {
            vertices,
            dim,
            ranked: false,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// All vertices; in cost order only after [`rank`](Simplex::rank).
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Sorts the vertices ascending by cost. The sort is stable, so cost
    /// ties keep their relative order and ranking an already ranked simplex
    /// changes nothing. Stored costs are finite by construction, which makes
    /// `total_cmp` a plain total order here.
    pub fn rank(&mut self) {
        self.vertices.sort_by(|a, b| a.cost.total_cmp(&b.cost));
        self.ranked = true;
    }

    fn assert_ranked(&self) {
        assert!(self.ranked, "rank() must be called before ordered access");
    }

    pub fn best(&self) -> &Vertex {
        self.assert_ranked();
        &self.vertices[0]
    }

    pub fn worst(&self) -> &Vertex {
        self.assert_ranked();
        &self.vertices[self.dim]
    }

    pub fn second_worst(&self) -> &Vertex {
        self.assert_ranked();
        &self.vertices[self.dim - 1]
    }

    /// Cost spread between the worst and the best vertex.
    pub fn spread(&self) -> f64 {
        self.assert_ranked();
        self.worst().cost - self.best().cost
    }

    /// Componentwise mean of every vertex except the worst.
    pub fn centroid(&self) -> Array1<f64> {
        self.assert_ranked();
        let mut sum = Array1::<f64>::zeros(self.dim);
        for vertex in &self.vertices[..self.dim] {
            sum += &vertex.point;
        }
        sum / self.dim as f64
    }

    /// Evaluates the trial vertex `centroid + coeff * (centroid - worst)`.
    /// Reflection, expansion and contraction are this one formula under
    /// different coefficients.
    pub fn trial<F>(
        &self,
        centroid: &Array1<f64>,
        coeff: f64,
        func: &mut Evaluations<F>,
    ) -> Result<Vertex, Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.assert_ranked();
        let worst = &self.worst().point;
        let point = centroid + &(coeff * &(centroid - worst));
        let cost = func.call(point.view())?;
        Ok(Vertex { point, cost })
    }

    /// Replaces the worst vertex. The order is stale afterwards.
    pub(crate) fn replace_worst(&mut self, vertex: Vertex) {
        self.assert_ranked();
        debug_assert_eq!(vertex.point.len(), self.dim);
        self.vertices[self.dim] = vertex;
        self.ranked = false;
    }

    /// Pulls every non-best vertex towards the best one by `sigma`,
    /// re-evaluating each moved point. The best vertex is untouched.
    pub(crate) fn shrink<F>(&mut self, sigma: f64, func: &mut Evaluations<F>) -> Result<(), Error>
    where
        F: Fn(ArrayView1<f64>) -> f64,
    {
        self.assert_ranked();
        self.ranked = false;
        let best = self.vertices[0].point.clone();
        for vertex in &mut self.vertices[1..] {
            let point = &best + &(sigma * &(&vertex.point - &best));
            let cost = func.call(point.view())?;
            *vertex = Vertex { point, cost };
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(x: ArrayView1<f64>) -> f64 {
        x.sum()
    }

    #[test]
    fn spans_dim_plus_one_vertices_with_cached_costs() {
        let mut func = Evaluations::new(sum);
        let simplex = Simplex::from_point(array![1.0, 2.0, 3.0].view(), 0.5, &mut func).unwrap();
        assert_eq!(simplex.dim(), 3);
        assert_eq!(simplex.vertices().len(), 4);
        for vertex in simplex.vertices() {
            assert_eq!(vertex.cost, vertex.point.sum());
        }
        assert_eq!(func.count(), 4);
    }

    #[test]
    fn perturbs_one_axis_per_vertex() {
        let mut func = Evaluations::new(sum);
        let simplex = Simplex::from_point(array![1.0, 2.0].view(), 0.25, &mut func).unwrap();
        assert_eq!(simplex.vertices()[0].point, array![1.0, 2.0]);
        assert_eq!(simplex.vertices()[1].point, array![1.25, 2.0]);
        assert_eq!(simplex.vertices()[2].point, array![1.0, 2.25]);
    }

    #[test]
    fn rejects_an_empty_point_before_evaluating() {
        let mut func = Evaluations::new(sum);
        let err = Simplex::from_point(Array1::<f64>::zeros(0).view(), 0.5, &mut func).unwrap_err();
        assert!(matches!(err, Error::InvalidDimension { .. }));
        assert_eq!(func.count(), 0);
    }

    #[test]
    fn rejects_a_zero_step_before_evaluating() {
        let mut func = Evaluations::new(sum);
        let err = Simplex::from_point(array![1.0].view(), 0.0, &mut func).unwrap_err();
        assert!(matches!(err, Error::DegenerateSimplex { step } if step == 0.0));
        assert_eq!(func.count(), 0);
    }

    #[test]
    fn rejects_a_vertex_matrix_of_the_wrong_shape() {
        let mut func = Evaluations::new(sum);
        let rows = Array2::<f64>::zeros((3, 3));
        let err = Simplex::from_vertices(rows.view(), &mut func).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidDimension {
                expected: 4,
                actual: 3
            }
        ));
        assert_eq!(func.count(), 0);
    }

    #[test]
    fn surfaces_a_non_finite_cost_at_construction() {
        let mut func = Evaluations::new(|_: ArrayView1<f64>| f64::NAN);
        let err = Simplex::from_point(array![1.0].view(), 0.5, &mut func).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCost { best: None, .. }));
    }

    #[test]
    fn ranking_is_ascending_and_idempotent() {
        let mut func = Evaluations::new(sum);
        let rows = array![[3.0], [1.0]];
        let mut simplex = Simplex::from_vertices(rows.view(), &mut func).unwrap();
        simplex.rank();
        let once: Vec<f64> = simplex.vertices().iter().map(|v| v.cost).collect();
        simplex.rank();
        let twice: Vec<f64> = simplex.vertices().iter().map(|v| v.cost).collect();
        assert_eq!(once, vec![1.0, 3.0]);
        assert_eq!(once, twice);
    }

    #[test]
    #[should_panic(expected = "rank() must be called")]
    fn ordered_access_requires_ranking() {
        let mut func = Evaluations::new(sum);
        let simplex = Simplex::from_point(array![1.0].view(), 0.5, &mut func).unwrap();
        let _ = simplex.best();
    }

    #[test]
    #[should_panic(expected = "rank() must be called")]
    fn mutation_invalidates_the_ranking() {
        let mut func = Evaluations::new(sum);
        let rows = array![[0.0, 0.0], [2.0, 0.0], [0.0, 4.0]];
        let mut simplex = Simplex::from_vertices(rows.view(), &mut func).unwrap();
        simplex.rank();
        simplex.replace_worst(Vertex {
            point: array![9.0, 9.0],
            cost: 18.0,
        });
        assert_eq!(simplex.vertices().len(), 3);
        let _ = simplex.best();
    }

    #[test]
    fn centroid_excludes_the_worst_vertex() {
        let mut func = Evaluations::new(sum);
        let rows = array![[0.0, 0.0], [2.0, 0.0], [0.0, 4.0]];
        let mut simplex = Simplex::from_vertices(rows.view(), &mut func).unwrap();
        simplex.rank();
        assert_eq!(simplex.centroid(), array![1.0, 0.0]);
    }

    #[test]
    fn trial_points_follow_the_general_form() {
        let mut func = Evaluations::new(sum);
        let rows = array![[0.0, 0.0], [2.0, 0.0], [0.0, 4.0]];
        let mut simplex = Simplex::from_vertices(rows.view(), &mut func).unwrap();
        simplex.rank();
        let centroid = simplex.centroid();

        let reflected = simplex.trial(&centroid, 1.0, &mut func).unwrap();
        assert_eq!(reflected.point, array![2.0, -4.0]);
        assert_eq!(reflected.cost, reflected.point.sum());

        let expanded = simplex.trial(&centroid, 2.0, &mut func).unwrap();
        assert_eq!(expanded.point, array![3.0, -8.0]);

        let contracted = simplex.trial(&centroid, 0.5, &mut func).unwrap();
        assert_eq!(contracted.point, array![1.5, -2.0]);
    }

    #[test]
    fn shrink_moves_every_vertex_towards_the_best() {
        let mut func = Evaluations::new(sum);
        let rows = array![[0.0, 0.0], [2.0, 0.0], [0.0, 4.0]];
        let mut simplex = Simplex::from_vertices(rows.view(), &mut func).unwrap();
        simplex.rank();
        let before: Vec<Array1<f64>> = simplex
            .vertices()
            .iter()
            .map(|v| v.point.clone())
            .collect();

        simplex.shrink(0.5, &mut func).unwrap();

        assert_eq!(simplex.vertices().len(), 3);
        assert_eq!(simplex.vertices()[0].point, before[0]);
        for (vertex, old) in simplex.vertices().iter().zip(&before).skip(1) {
            let expected = &before[0] + &(0.5 * &(old - &before[0]));
            assert_eq!(vertex.point, expected);
            assert_eq!(vertex.cost, vertex.point.sum());
        }
    }
}
